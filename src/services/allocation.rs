use crate::error::AppError;

/// Percentage share per part. The number of shares is the number of parts.
/// Shares are not required to sum to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    shares: Vec<f64>,
}

impl Default for Allocation {
    fn default() -> Self {
        Self { shares: vec![100.0] }
    }
}

impl Allocation {
    /// `parts` shares of `floor(100 / parts)` each. The remainder is dropped,
    /// so e.g. three parts sum to 99.
    pub fn equal(parts: usize) -> Result<Self, AppError> {
        if parts == 0 {
            return Err(AppError::InvalidInput("parts must be at least 1".to_string()));
        }
        let share = (100.0 / parts as f64).floor();
        Ok(Self { shares: vec![share; parts] })
    }

    pub fn from_shares(shares: Vec<f64>) -> Result<Self, AppError> {
        if shares.is_empty() {
            return Err(AppError::InvalidInput("at least one percentage is required".to_string()));
        }
        Ok(Self { shares })
    }

    pub fn parts(&self) -> usize {
        self.shares.len()
    }

    pub fn shares(&self) -> &[f64] {
        &self.shares
    }

    /// Changing the part count discards every custom share.
    pub fn set_parts(&mut self, parts: usize) -> Result<(), AppError> {
        *self = Self::equal(parts)?;
        Ok(())
    }

    /// Sets part `index` (0-based) to `value` and gives every other part
    /// `floor((100 - value) / (parts - 1))`.
    ///
    /// Earlier edits to other parts are overwritten, so only one part can hold
    /// an unequal share at a time. This is kept for compatibility with the
    /// interactive splitter, although a proportional rebalance would be
    /// friendlier.
    pub fn edit(&mut self, index: usize, value: f64) -> Result<(), AppError> {
        let parts = self.parts();
        if index >= parts {
            return Err(AppError::InvalidInput(format!(
                "part {} does not exist, there are {} parts",
                index + 1,
                parts
            )));
        }

        self.shares[index] = value;
        if parts > 1 {
            let equal_share = ((100.0 - value) / (parts - 1) as f64).floor();
            for (i, share) in self.shares.iter_mut().enumerate() {
                if i != index {
                    *share = equal_share;
                }
            }
        }
        tracing::debug!("Allocation after editing part {}: {:?}", index + 1, self.shares);
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_full_part() {
        assert_eq!(Allocation::default().shares(), &[100.0]);
    }

    #[test]
    fn equal_shares_drop_the_remainder() {
        let allocation = Allocation::equal(3).unwrap();
        assert_eq!(allocation.shares(), &[33.0, 33.0, 33.0]);
        assert_eq!(allocation.total(), 99.0);
        assert_eq!(Allocation::equal(4).unwrap().shares(), &[25.0; 4]);
        assert_eq!(Allocation::equal(7).unwrap().parts(), 7);
    }

    #[test]
    fn zero_parts_is_rejected() {
        assert!(matches!(Allocation::equal(0), Err(AppError::InvalidInput(_))));
        assert!(matches!(Allocation::from_shares(vec![]), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn edit_redistributes_evenly_to_the_others() {
        let mut allocation = Allocation::from_shares(vec![33.0, 33.0, 34.0]).unwrap();
        allocation.edit(1, 60.0).unwrap();
        assert_eq!(allocation.shares(), &[20.0, 60.0, 20.0]);
    }

    #[test]
    fn later_edit_discards_earlier_custom_share() {
        let mut allocation = Allocation::equal(3).unwrap();
        allocation.edit(0, 50.0).unwrap();
        assert_eq!(allocation.shares(), &[50.0, 25.0, 25.0]);
        allocation.edit(1, 10.0).unwrap();
        assert_eq!(allocation.shares(), &[45.0, 10.0, 45.0]);
    }

    #[test]
    fn edit_rounds_the_equal_share_down() {
        let mut allocation = Allocation::equal(4).unwrap();
        allocation.edit(3, 50.0).unwrap();
        assert_eq!(allocation.shares(), &[16.0, 16.0, 16.0, 50.0]);
    }

    #[test]
    fn edit_single_part_only_sets_it() {
        let mut allocation = Allocation::default();
        allocation.edit(0, 40.0).unwrap();
        assert_eq!(allocation.shares(), &[40.0]);
    }

    #[test]
    fn edit_out_of_range_is_rejected() {
        let mut allocation = Allocation::equal(2).unwrap();
        assert!(allocation.edit(2, 10.0).is_err());
        assert_eq!(allocation.shares(), &[50.0, 50.0]);
    }

    #[test]
    fn set_parts_reinitializes() {
        let mut allocation = Allocation::equal(2).unwrap();
        allocation.edit(0, 80.0).unwrap();
        allocation.set_parts(5).unwrap();
        assert_eq!(allocation.shares(), &[20.0; 5]);
    }
}
