//! Distance-banded fare calculation.

/// Errors from fare calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// Fares are only defined for a positive distance
    #[error("fare distance must be positive, got {0}")]
    NonPositiveDistance(u64),

    /// A step size of zero would never advance
    #[error("invalid fare policy: {0}")]
    InvalidPolicy(&'static str),

    /// The fare does not fit in a `u64`
    #[error("fare is too large to represent")]
    Overflow,
}

/// Reduced fares by rider age.
///
/// Discounted riders first have `deduction` taken off the fare, then pay
/// the given percentage of what remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeDiscount {
    /// Riders younger than this travel free.
    pub free_below_age: u32,

    /// Oldest age that pays the child rate.
    pub child_max_age: u32,

    /// Percentage of the reduced fare children pay.
    pub child_percent: u64,

    /// Oldest age that pays the youth rate.
    pub youth_max_age: u32,

    /// Percentage of the reduced fare youths pay.
    pub youth_percent: u64,

    /// Amount taken off before the percentage applies.
    pub deduction: u64,
}

impl Default for AgeDiscount {
    fn default() -> Self {
        Self {
            free_below_age: 6,
            child_max_age: 12,
            child_percent: 50,
            youth_max_age: 18,
            youth_percent: 80,
            deduction: 350,
        }
    }
}

impl AgeDiscount {
    /// Apply the discount for `age` to a full fare.
    pub fn apply(&self, fare: u64, age: u32) -> Result<u64, FareError> {
        if age < self.free_below_age {
            return Ok(0);
        }
        let percent = if age <= self.child_max_age {
            self.child_percent
        } else if age <= self.youth_max_age {
            self.youth_percent
        } else {
            return Ok(fare);
        };
        let reduced = u128::from(fare.saturating_sub(self.deduction));
        let discounted = reduced
            .checked_mul(u128::from(percent))
            .ok_or(FareError::Overflow)?
            / 100;
        u64::try_from(discounted).map_err(|_| FareError::Overflow)
    }
}

/// Fare schedule.
///
/// Three bands by total distance:
/// - up to `base_distance`: `base_fare`
/// - up to `middle_limit`: plus `middle_step_fare` per started `middle_step`
///   beyond `base_distance`
/// - beyond `middle_limit`: plus `far_step_fare` per started `far_step`
///   beyond `middle_limit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarePolicy {
    pub base_fare: u64,
    pub base_distance: u64,
    pub middle_limit: u64,
    pub middle_step: u64,
    pub middle_step_fare: u64,
    pub far_step: u64,
    pub far_step_fare: u64,
    pub age_discount: AgeDiscount,
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self {
            base_fare: 1250,
            base_distance: 10,
            middle_limit: 50,
            middle_step: 5,
            middle_step_fare: 100,
            far_step: 8,
            far_step_fare: 100,
            age_discount: AgeDiscount::default(),
        }
    }
}

/// Converts route distances to fares under a [`FarePolicy`].
///
/// # Examples
///
/// ```
/// use subway_server::route::FareCalculator;
///
/// let fares = FareCalculator::default();
/// assert_eq!(fares.fare(10).unwrap(), 1250);
/// assert_eq!(fares.fare(11).unwrap(), 1350);
/// assert_eq!(fares.fare(58).unwrap(), 2150);
/// assert!(fares.fare(0).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    policy: FarePolicy,
}

impl FareCalculator {
    pub fn new(policy: FarePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FarePolicy {
        &self.policy
    }

    /// Fare for travelling `distance`.
    pub fn fare(&self, distance: u64) -> Result<u64, FareError> {
        if distance == 0 {
            return Err(FareError::NonPositiveDistance(distance));
        }
        let p = &self.policy;
        if p.middle_step == 0 || p.far_step == 0 {
            return Err(FareError::InvalidPolicy("step sizes must be positive"));
        }

        let middle = distance.min(p.middle_limit).saturating_sub(p.base_distance);
        let far = distance.saturating_sub(p.middle_limit.max(p.base_distance));

        let middle_fare = middle.div_ceil(p.middle_step).checked_mul(p.middle_step_fare);
        let far_fare = far.div_ceil(p.far_step).checked_mul(p.far_step_fare);

        middle_fare
            .zip(far_fare)
            .and_then(|(m, f)| p.base_fare.checked_add(m)?.checked_add(f))
            .ok_or(FareError::Overflow)
    }

    /// Fare for a route, including the largest line surcharge and any age discount.
    pub fn route_fare(
        &self,
        distance: u64,
        surcharge: u64,
        age: Option<u32>,
    ) -> Result<u64, FareError> {
        let full = self
            .fare(distance)?
            .checked_add(surcharge)
            .ok_or(FareError::Overflow)?;
        match age {
            Some(age) => self.policy.age_discount.apply(full, age),
            None => Ok(full),
        }
    }
}
