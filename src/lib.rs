//! Real-estate calculators
//!
//! This library provides:
//! - UTM (zones 18S/19S) to WGS84 latitude/longitude conversion, single and batch
//! - Mortgage amortization in pesos or an inflation-indexed unit (UF)
//! - Compound-interest investment projections
//! - Buy-vs-rent comparison and parallel sensitivity sweeps

pub mod error;
pub mod assumptions;
pub mod locale;
pub mod geodesy;
pub mod finance;
pub mod scenario;

// Re-export commonly used types
pub use error::CalcError;
pub use geodesy::{GeoPoint, UtmPoint, UtmZone, LabeledPoint, convert, convert_batch};
pub use finance::{
    amortize, project, compare, evaluate,
    LoanParameters, UnitOfAccount, AmortizationResult,
    InvestmentParameters, InvestmentPoint,
    BuyRentInputs, BuyRentReport, Comparison, Outcome,
};
pub use scenario::ScenarioRunner;
