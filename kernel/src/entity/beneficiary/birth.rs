use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct DateOfBirth(Date);

impl DateOfBirth {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Age(i32);

impl Age {
    pub fn new(age: impl Into<i32>) -> Self {
        Self(age.into())
    }

    /// Whole years elapsed between `date_of_birth` and `today`.
    pub fn at(date_of_birth: &DateOfBirth, today: Date) -> Self {
        let born = date_of_birth.as_ref();
        let mut age = today.year() - born.year();
        let birthday = (u8::from(born.month()), born.day());
        if (u8::from(today.month()), today.day()) < birthday {
            age -= 1;
        }
        Self(age)
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::{Age, DateOfBirth};

    #[test]
    fn age_is_decremented_before_birthday() {
        let dob = DateOfBirth::new(date!(2000 - 06 - 15));
        assert_eq!(Age::at(&dob, date!(2024 - 06 - 14)), Age::new(23));
        assert_eq!(Age::at(&dob, date!(2024 - 06 - 15)), Age::new(24));
        assert_eq!(Age::at(&dob, date!(2024 - 05 - 20)), Age::new(23));
        assert_eq!(Age::at(&dob, date!(2024 - 12 - 01)), Age::new(24));
    }

    #[test]
    fn born_today_is_zero() {
        let dob = DateOfBirth::new(date!(2024 - 02 - 29));
        assert_eq!(Age::at(&dob, date!(2024 - 02 - 29)), Age::new(0));
        assert_eq!(Age::at(&dob, date!(2025 - 02 - 28)), Age::new(0));
        assert_eq!(Age::at(&dob, date!(2025 - 03 - 01)), Age::new(1));
    }
}
