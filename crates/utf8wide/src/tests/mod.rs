mod arbitrary;
mod utils;

mod property_strict;
