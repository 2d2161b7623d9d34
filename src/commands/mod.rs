pub mod fix;
pub mod report;
pub mod scan;

pub use fix::fix;
pub use report::report;
pub use scan::scan;
