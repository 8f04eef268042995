use appsvc_http::{AppSvcClient, Catalog, SearchAppsAclRequest, SearchAppsRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("appsvc_http=debug")),
        )
        .init();

    let catalog = Catalog::new(AppSvcClient::from_env()?);
    let name = std::env::args().nth(1).unwrap_or_else(|| "doom".to_owned());

    let acl = catalog
        .search_apps_acl(&SearchAppsAclRequest {
            app_name: Some(name.clone()),
            ..SearchAppsAclRequest::default()
        })
        .await?;
    println!("suggestions: {:?}", acl.acl);

    let found = catalog
        .search_apps(
            None,
            &SearchAppsRequest {
                app_name: Some(name),
                limit: 10,
                ..SearchAppsRequest::default()
            },
        )
        .await?;

    for app in found.apps {
        println!("{} ({}) {}", app.name, app.year_released, app.id);
    }

    Ok(())
}
