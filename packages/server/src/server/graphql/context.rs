use std::sync::Arc;

use crate::common::ServiceDeps;

/// GraphQL request context.
///
/// Contains the shared resources available to all resolvers.
#[derive(Clone)]
pub struct GraphQLContext {
    pub deps: Arc<ServiceDeps>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(deps: Arc<ServiceDeps>) -> Self {
        Self { deps }
    }
}
