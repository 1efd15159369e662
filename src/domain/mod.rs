// Domain layer - datasets, pages and chart specifications
pub mod chart;
pub mod dataset;
pub mod fields;
pub mod page;
