// Domain layer: the scraped record, site list and the ports the pipeline depends on.

pub mod model;
pub mod ports;
