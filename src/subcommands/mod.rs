mod check;
pub use self::check::CheckApp;

mod traits;
pub use self::traits::NdtestApp;
