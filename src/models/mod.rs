//! Typed OpenAlex records and the JSON mapping that builds them.
//!
//! Responses are cached as raw JSON and mapped afterwards, so these types
//! can change shape without invalidating cache entries.

mod author;
mod citation;
mod institution;
mod location;
mod mapper;
mod record;
mod source;
mod topic;
mod work;

pub use author::{Author, Authorship};
pub use citation::Citation;
pub use institution::Institution;
pub use location::Location;
pub use mapper::{FromJson, JsonFields};
pub use record::{Entity, FromResponse, Record};
pub use source::Source;
pub use topic::{Domain, Field, Subfield, Topic};
pub use work::Work;
