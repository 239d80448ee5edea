#![warn(clippy::all)]

mod location;
pub use location::Location;

mod demand;
pub use demand::DemandPoint;

mod site;
pub use site::CandidateSite;

mod coverage;
pub use coverage::travel_time_matrix;
pub use coverage::CoverageMatrix;

mod evaluation;
pub use evaluation::coverage_stats;
pub use evaluation::gap_closure;
pub use evaluation::CoverageReport;
pub use evaluation::GapClosure;
pub use evaluation::GAP_EPSILON;

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;

/// Average straight-line travel speed in km/h used to convert distances
/// into response times. A zone dependent speed model (urban vs highway)
/// exists in the wider project but is not implemented here; every pair
/// uses this single constant.
pub const AVG_SPEED_KMH: f64 = 65.0;

pub fn get_reader(path: &str) -> Box<dyn Read> {
    if path.ends_with(".gz") {
        Box::new(GzDecoder::new(File::open(path).unwrap()))
    } else {
        Box::new(File::open(path).unwrap())
    }
}
