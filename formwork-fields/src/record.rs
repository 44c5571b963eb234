//! Records bound to fields for rule interpolation

use serde_json::Value;
use std::fmt;

/// Domain entity with a primary key
pub trait Record: fmt::Debug + Send + Sync {
    /// Primary key, `None` while unsaved
    fn key(&self) -> Option<String>;
}

/// JSON object whose `id` member is the key
impl Record for Value {
    fn key(&self) -> Option<String> {
        match self.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

impl Record for String {
    fn key(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Record for &'static str {
    fn key(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

macro_rules! integer_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn key(&self) -> Option<String> {
                Some(self.to_string())
            }
        })*
    };
}

integer_record!(i32, i64, u32, u64, usize);
