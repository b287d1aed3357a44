/// Default ceiling on the decoded pixel payload (`3 * width * height`).
pub const DEFAULT_MAX_BITMAP_BYTES: u64 = 500_000_000;

/// Resource limits for decode operations.
///
/// The byte ceiling guards against pathological allocation driven by a
/// malformed header. Per-axis limits default to `None` (no limit).
#[derive(Clone, Debug)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel payload in bytes (`3 * width * height`).
    pub max_bitmap_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_bitmap_bytes: DEFAULT_MAX_BITMAP_BYTES,
        }
    }
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or `BitmapTooLarge`.
    ///
    /// Non-positive dimensions pass here; they are rejected at allocation.
    pub(crate) fn check(&self, width: i64, height: i64) -> Result<(), crate::BitmapError> {
        let bytes = (width.max(0) as u64)
            .saturating_mul(height.max(0) as u64)
            .saturating_mul(3);
        let too_large = || crate::BitmapError::BitmapTooLarge {
            width,
            height,
            bytes,
            limit: self.max_bitmap_bytes,
        };

        if let Some(max_w) = self.max_width {
            if width > i64::from(max_w) {
                return Err(too_large());
            }
        }
        if let Some(max_h) = self.max_height {
            if height > i64::from(max_h) {
                return Err(too_large());
            }
        }
        if bytes > self.max_bitmap_bytes {
            return Err(too_large());
        }
        Ok(())
    }
}
