//! The average-rating value reported by the ratings endpoints.
//!
//! An average is either a number or the literal text `"No ratings yet"`. The
//! per-professor listing carries an `Average<f64>` rounded to one decimal,
//! the per-module endpoint an `Average<i64>` rounded to a whole star.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel sent in place of a number when nothing has been rated.
pub const NO_RATINGS: &str = "No ratings yet";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average<T> {
    Rated(T),
    NoRatings,
}

impl<T> Average<T> {
    /// Returns the numeric value, if there is one.
    pub fn rated(self) -> Option<T> {
        match self {
            Average::Rated(value) => Some(value),
            Average::NoRatings => None,
        }
    }
}

impl<T> From<Option<T>> for Average<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Average::NoRatings, Average::Rated)
    }
}

impl<T: fmt::Display> fmt::Display for Average<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::Rated(value) => value.fmt(f),
            Average::NoRatings => f.write_str(NO_RATINGS),
        }
    }
}

impl<T: Serialize> Serialize for Average<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Average::Rated(value) => value.serialize(serializer),
            Average::NoRatings => serializer.serialize_str(NO_RATINGS),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAverage<T> {
    Rated(T),
    Text(String),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Average<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAverage::<T>::deserialize(deserializer)? {
            RawAverage::Rated(value) => Ok(Average::Rated(value)),
            RawAverage::Text(text) if text == NO_RATINGS => Ok(Average::NoRatings),
            RawAverage::Text(text) => Err(de::Error::custom(format!(
                "expected a number or \"{NO_RATINGS}\", got \"{text}\""
            ))),
        }
    }
}
