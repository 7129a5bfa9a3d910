//! Uniform integer randomness.

/// A source of uniformly distributed integers.
///
/// The generator only ever asks for inclusive ranges, mirroring how the
/// filler content is specified ("between 1 and `max_width` siblings").
pub trait RandomSource {
    /// Returns an integer in `low..=high`. An inverted range yields `low`.
    fn int(&mut self, low: u32, high: u32) -> u32;

    /// Returns an index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let high = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.int(0, high) as usize
    }

    /// Shuffles a slice in place (Fisher-Yates).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl RandomSource for fastrand::Rng {
    fn int(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.u32(low..=high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int(&mut self, low: u32, high: u32) -> u32 {
        (**self).int(low, high)
    }
}
