pub mod combine;
pub mod dates;
pub mod formatting;
pub mod grouping;
pub mod normalizer;
pub mod pagination;
pub mod projection;
pub mod ranking;
pub mod resolver;
pub mod search;
pub mod time_parser;
