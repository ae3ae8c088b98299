#[cfg(test)]
mod tests {
    use crate::routes::routes;
    use crate::service::mock::MockVisitStore;
    use std::sync::Arc;
    use viewty_common::VisitStore;
    use viewty_config::AppConfig;

    #[tokio::test]
    async fn routes_build_with_an_injected_store() {
        let config = Arc::new(AppConfig::default());
        let store: Arc<dyn VisitStore> = Arc::new(MockVisitStore::new());

        // Nesting forces axum to validate every registered path
        let router = routes(config, store);
        let _app = axum::Router::new().nest("/api", router);
    }
}
