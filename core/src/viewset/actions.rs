// scaffold/src/viewset/actions.rs

use actix_web::http::Method;

/// The standard actions of a model viewset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
  List,
  Create,
  Retrieve,
  Update,
  PartialUpdate,
  Destroy,
  /// `OPTIONS` on either route.
  Metadata,
}

impl ActionType {
  /// Actions served by the collection route (`/{prefix}/`).
  pub const COLLECTION: &'static [ActionType] = &[ActionType::List, ActionType::Create, ActionType::Metadata];

  /// Actions served by the detail route (`/{prefix}/{pk}/`).
  pub const DETAIL: &'static [ActionType] = &[
    ActionType::Retrieve,
    ActionType::Update,
    ActionType::PartialUpdate,
    ActionType::Destroy,
    ActionType::Metadata,
  ];

  pub const COLLECTION_ALLOW: &'static str = "GET, POST, HEAD, OPTIONS";
  pub const DETAIL_ALLOW: &'static str = "GET, PUT, PATCH, DELETE, HEAD, OPTIONS";

  /// `HEAD` is answered by the action that serves `GET`.
  pub fn answers_head(self) -> bool {
    matches!(self, ActionType::List | ActionType::Retrieve)
  }

  /// The methods this action is routed for.
  pub fn methods(self) -> Vec<Method> {
    let mut methods = vec![self.method()];
    if self.answers_head() {
      methods.push(Method::HEAD);
    }
    methods
  }

  pub fn method(self) -> Method {
    match self {
      ActionType::List | ActionType::Retrieve => Method::GET,
      ActionType::Create => Method::POST,
      ActionType::Update => Method::PUT,
      ActionType::PartialUpdate => Method::PATCH,
      ActionType::Destroy => Method::DELETE,
      ActionType::Metadata => Method::OPTIONS,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      ActionType::List => "list",
      ActionType::Create => "create",
      ActionType::Retrieve => "retrieve",
      ActionType::Update => "update",
      ActionType::PartialUpdate => "partial_update",
      ActionType::Destroy => "destroy",
      ActionType::Metadata => "metadata",
    }
  }
}
