pub mod assets;
pub mod links;
pub mod redirect;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{HeaderMap, Method, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::{config::AppConfig, router, store::LinkStore, AppState, CodeGenerator};

    pub struct TestResponse {
        pub status: StatusCode,
        pub headers: HeaderMap,
        pub body: String,
    }

    fn fixed_code() -> String {
        "deadbeef".into()
    }

    /// Router over `store` whose generated codes are always `deadbeef`.
    pub fn app_with(store: Arc<dyn LinkStore>) -> (Router, Arc<AppState>) {
        app_with_generator(store, fixed_code)
    }

    pub fn app_with_generator(
        store: Arc<dyn LinkStore>,
        generate_code: CodeGenerator,
    ) -> (Router, Arc<AppState>) {
        app_with_config(store, generate_code, AppConfig::default())
    }

    pub fn app_with_config(
        store: Arc<dyn LinkStore>,
        generate_code: CodeGenerator,
        config: AppConfig,
    ) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(config, store, generate_code));
        (router(state.clone()), state)
    }

    pub async fn send(app: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_owned()))
            .expect("build request");

        let res = app.clone().oneshot(req).await.expect("infallible router");
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }
}
