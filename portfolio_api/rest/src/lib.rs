use std::{net::IpAddr, sync::Arc};

use axum::Router;
use portfolio_core_contact_contracts::ContactService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    contact: Contact,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Contact) -> Self {
        Self { contact }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(Arc::new(self.contact)));
        middlewares::trace::add(router)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use portfolio_core_contact_contracts::MockContactService;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    async fn status(request: Request<Body>) -> StatusCode {
        let sut = RestServer::new(MockContactService::new()).router();
        sut.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn unknown_route() {
        let request = Request::get("/contact/123").body(Body::empty()).unwrap();

        assert_eq!(status(request).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn contact_requires_post() {
        let request = Request::get("/contact").body(Body::empty()).unwrap();

        assert_eq!(status(request).await, StatusCode::METHOD_NOT_ALLOWED);
    }
}
