use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    marker::PhantomData,
    ops::{Add, Sub},
};

use serde::{Serialize, Serializer};

/// Distances are stored as whole nanometres so that summing the lengths of a
/// path gives the same result whatever the summation order.
pub trait DistanceUnit: Copy + Eq {
    const NAME: &'static str;
    const NANOMETERS_IN_UNIT: i64;
}

#[derive(Debug, Clone, Copy, Eq)]
pub struct Distance<T: DistanceUnit> {
    nm: i64,
    unit: PhantomData<T>,
}

macro_rules! create_distance_unit {
    ($struct_name:ident, $string_name:expr , $nm_conv:expr) => {
        #[derive(Debug, Copy, Clone, Eq, PartialEq)]
        pub struct $struct_name;

        impl DistanceUnit for $struct_name {
            const NAME: &'static str = $string_name;
            const NANOMETERS_IN_UNIT: i64 = $nm_conv;
        }
    };
}

create_distance_unit!(Meters, "meter", 1_000_000_000);
create_distance_unit!(Kilometers, "kilometer", 1_000_000_000_000);

impl<T: DistanceUnit> Distance<T> {
    pub const fn zero() -> Self {
        Distance {
            nm: 0,
            unit: PhantomData,
        }
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        (self.nm as f64) / (T::NANOMETERS_IN_UNIT as f64)
    }

    pub fn is_zero(&self) -> bool {
        self.nm == 0
    }

    pub fn convert<U: DistanceUnit>(self) -> Distance<U> {
        Distance {
            nm: self.nm,
            unit: PhantomData,
        }
    }
}

impl<T: DistanceUnit> Default for Distance<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: DistanceUnit> From<Distance<T>> for f64 {
    fn from(value: Distance<T>) -> Self {
        value.value()
    }
}

impl<T: DistanceUnit> From<f64> for Distance<T> {
    fn from(value: f64) -> Self {
        Distance {
            nm: (value * (T::NANOMETERS_IN_UNIT as f64)).round() as i64,
            unit: PhantomData,
        }
    }
}

impl<T: DistanceUnit> From<i64> for Distance<T> {
    fn from(value: i64) -> Self {
        Distance {
            nm: value * T::NANOMETERS_IN_UNIT,
            unit: PhantomData,
        }
    }
}

impl<T: DistanceUnit> fmt::Display for Distance<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.value();
        write!(
            f,
            "{} {}{}",
            value,
            T::NAME,
            if value == 1.0 { "" } else { "s" }
        )
    }
}

impl<T: DistanceUnit> Ord for Distance<T> {
    fn cmp(&self, other: &Distance<T>) -> Ordering {
        self.nm.cmp(&other.nm)
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> PartialEq<Distance<T2>> for Distance<T1> {
    fn eq(&self, other: &Distance<T2>) -> bool {
        self.nm == other.nm
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> PartialOrd<Distance<T2>> for Distance<T1> {
    fn partial_cmp(&self, other: &Distance<T2>) -> Option<Ordering> {
        Some(self.nm.cmp(&other.nm))
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> Add<Distance<T2>> for Distance<T1> {
    type Output = Distance<T1>;

    fn add(self, other: Distance<T2>) -> Distance<T1> {
        Distance {
            nm: self.nm + other.nm,
            unit: PhantomData,
        }
    }
}

impl<T1: DistanceUnit, T2: DistanceUnit> Sub<Distance<T2>> for Distance<T1> {
    type Output = Distance<T1>;

    fn sub(self, other: Distance<T2>) -> Distance<T1> {
        Distance {
            nm: self.nm - other.nm,
            unit: PhantomData,
        }
    }
}

impl<T: DistanceUnit> Sum for Distance<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::zero(), |acc, distance| acc + distance)
    }
}

impl<T: DistanceUnit> Serialize for Distance<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

#[macro_export]
macro_rules! meters {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Meters>::from($num)
    };
}

#[macro_export]
macro_rules! kilometers {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Kilometers>::from($num)
    };
}
