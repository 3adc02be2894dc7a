pub mod logging;

// Leaf data: content profiles by denomination key
pub mod profile;

pub mod request;

// Engines
pub mod adaptation;
pub mod strategy;
pub mod generation;

// Six-step configuration workflow
pub mod workflow;

// Facade over the engines for one request
pub mod pipeline;
