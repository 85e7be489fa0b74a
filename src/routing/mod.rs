pub mod action;
pub mod label;
pub mod normalize;
pub mod projection;
pub mod resolver;
pub mod table;
pub mod target;
pub mod validate;

pub use action::{ActionLike, TARGET_FIELDS};
pub use label::label_candidates;
pub use normalize::normalize_route;
pub use projection::{module_from_payload, project_payload, step_from_payload};
pub use resolver::{
    resolve_explicit, resolve_intent, resolve_label, resolve_payload_shape, Resolution,
    ResolutionSource,
};
pub use table::RouteTable;
pub use target::{compose_route, is_absolute_url, RouteParts, RouteTarget};
pub use validate::{AllowedRoutes, HOME_ROUTE, LOGIN_ROUTE};
