//! Domain types for the breakout checklist

pub mod bar;
pub mod conditions;
pub mod input;
pub mod plan;
pub mod price_set;
pub mod result;

pub use bar::Bar;
pub use conditions::{Condition, ConditionSet};
pub use input::{AnalysisInput, InputField, PartialInput};
pub use plan::{PositionSizing, TradePlan};
pub use price_set::{InputError, PriceSet};
pub use result::{AnalysisResult, Verdict};
