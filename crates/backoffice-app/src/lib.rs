// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod filter;
pub mod forms;
pub mod ids;
pub mod modal;
pub mod model;
pub mod schema;
pub mod session;
pub mod state;
pub mod validation;

pub use filter::*;
pub use forms::*;
pub use ids::*;
pub use modal::*;
pub use model::*;
pub use schema::*;
pub use session::*;
pub use state::*;
