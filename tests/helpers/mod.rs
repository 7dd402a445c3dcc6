// Not every test binary uses every fixture.
#![allow(dead_code)]

pub mod model_fixtures;
