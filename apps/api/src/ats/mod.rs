// Resume / job-description compatibility analysis.
// keywords → scoring → feedback; extract turns uploads into text, handlers expose it over HTTP.

pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod scoring;
