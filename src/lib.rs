//! VRP-QUBO Library
//!
//! Formulates the multi-vehicle routing problem as a binary quadratic model for
//! external samplers, and turns the samples they return back into routes.
//!
//! # Features
//!
//! - Objective construction over `vehicle_vertex_step` binary variables
//! - JSON export of the model for an external sampler
//! - Sample decoding into per-vehicle routes, cost evaluation and reporting
//! - Random-partition baseline for sanity checks
//! - Edge-list CSV to dense adjacency matrix conversion
//!
//! # Example
//!
//! ```no_run
//! use vrp_qubo::instance::VrpInstance;
//! use vrp_qubo::model::construct_objective;
//! use vrp_qubo::sample::Sample;
//! use vrp_qubo::decoder::{decode_sample, report};
//!
//! let instance = VrpInstance::from_file("distances.txt", 2).unwrap();
//! let n = instance.num_locations();
//!
//! let (_, model) = construct_objective(n, &instance.distances, instance.num_vehicles).unwrap();
//! model.to_serializable().save("model.json").unwrap();
//!
//! // ... run the external sampler on model.json ...
//!
//! let sample = Sample::from_file("sample.json").unwrap();
//! let routes = decode_sample(&sample, instance.num_vehicles, n).unwrap();
//! report(&routes, &instance.distances).unwrap();
//! ```

pub mod error;
pub mod instance;
pub mod model;
pub mod sample;
pub mod solution;
pub mod decoder;
pub mod adjacency;
pub mod benchmark;

pub use error::{Result, VrpError};
pub use instance::{DistanceMatrix, VrpInstance};
pub use sample::Sample;
pub use solution::{Route, RoutingSolution};
