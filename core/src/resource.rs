//! The List/Get/Create/Destroy contract shared by every resource.
//!
//! # Design
//! A `Resource` names its path prefix, the entity it lists and fetches, and
//! how a create call is validated, encoded and answered. `Service` supplies
//! the four operations once for any resource, delegating transport work to
//! `Client`.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::error::Result;
use crate::http::{HttpMethod, HttpTransport};

/// A collection exposed by the API under a single path prefix.
pub trait Resource {
    /// Logical collection path, e.g. `/blocks`.
    const PATH: &'static str;

    /// Record returned by `list` and `get`.
    type Entity: DeserializeOwned;

    /// Caller-built payload for `create`.
    type Params;

    /// Record returned by `create`. Not necessarily `Entity`.
    type Created: DeserializeOwned;

    /// Rejects invalid parameters before any request is built.
    fn validate(params: &Self::Params) -> Result<()>;

    /// Form body for the create request.
    fn encode(params: &Self::Params) -> Result<String>;
}

/// Operations on one resource, borrowed from a `Client`.
pub struct Service<'a, R, T> {
    client: &'a Client<T>,
    resource: PhantomData<R>,
}

impl<'a, R: Resource, T: HttpTransport> Service<'a, R, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self {
            client,
            resource: PhantomData,
        }
    }

    pub fn list(&self) -> Result<Vec<R::Entity>> {
        let req = self.client.build_request(HttpMethod::Get, R::PATH, None)?;
        self.client.execute(&req)
    }

    /// Fetches one record. A missing id surfaces as the server's status error.
    pub fn get(&self, id: &str) -> Result<R::Entity> {
        let req = self
            .client
            .build_request(HttpMethod::Get, &member_path::<R>(id), None)?;
        self.client.execute(&req)
    }

    /// Validates, then POSTs the form-encoded parameters.
    pub fn create(&self, params: &R::Params) -> Result<R::Created> {
        R::validate(params)?;
        let body = R::encode(params)?;
        let req = self
            .client
            .build_request(HttpMethod::Post, R::PATH, Some(body))?;
        self.client.execute(&req)
    }

    pub fn destroy(&self, id: &str) -> Result<()> {
        let req = self
            .client
            .build_request(HttpMethod::Delete, &member_path::<R>(id), None)?;
        self.client.execute_empty(&req)
    }
}

fn member_path<R: Resource>(id: &str) -> String {
    format!("{}/{id}", R::PATH)
}
