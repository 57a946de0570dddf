use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info, Instrument};

use delivery_admin::app_system::{setup_tracing, DeliverySystem};
use delivery_admin::config::AppConfig;
use delivery_admin::domain::{CategoryCreate, FulfillmentType, LineItem, OrderCreate, OrderStatus, ProductCreate};
use delivery_admin::feed::LogNotifier;
use delivery_admin::format::format_brl;
use delivery_admin::reports::{DashboardReport, Period};

fn sample_order(cliente: &str, tipo: FulfillmentType, itens: &[&str], valor_total: f64) -> OrderCreate {
    OrderCreate {
        cliente_nome: cliente.to_string(),
        cliente_telefone: "(11) 99999-0000".to_string(),
        endereco: (tipo == FulfillmentType::Entrega).then(|| "Rua Exemplo, 123".to_string()),
        itens: itens.iter().map(|name| LineItem::Name(name.to_string())).collect(),
        valor_total,
        tipo_retirada: tipo,
        forma_pagamento: "Pix".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    setup_tracing(config.log_filter.as_deref());

    info!("Starting delivery admin");
    let timezone = config.timezone;
    let system = DeliverySystem::new(config);

    let settings = system.settings_client.get_settings().await?;
    info!(store = %settings.nome_estabelecimento, "Settings loaded");

    let span = tracing::info_span!("catalog_setup");
    async {
        let category = system.category_client.create_category(CategoryCreate::new("Pizzas")).await?;
        for (nome, preco) in [("Margherita", 45.0), ("Calabresa", 42.0)] {
            system
                .product_client
                .create_product(ProductCreate::new(nome, preco, category.clone()))
                .await?;
        }
        info!(category_id = %category, "Catalog seeded");
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    let feed = system.start_order_feed(Arc::new(LogNotifier)).await?;

    let span = tracing::info_span!("order_processing");
    async {
        let orders = &system.order_client;
        let first = orders
            .create_order(sample_order("Ana", FulfillmentType::Entrega, &["Margherita"], 50.0))
            .await?;
        let second = orders
            .create_order(sample_order("Bruno", FulfillmentType::Retirada, &["Calabresa", "Suco"], 51.0))
            .await?;
        let third = orders
            .create_order(sample_order("Carla", FulfillmentType::Entrega, &["Margherita"], 50.0))
            .await?;

        orders.accept_order(first.clone()).await?;
        orders.set_order_status(first.clone(), OrderStatus::SaiuParaEntrega).await?;
        orders.set_order_status(first, OrderStatus::Concluido).await?;
        orders.accept_order(second).await?;
        orders.reject_order(third.clone(), "Fora da área de entrega".to_string()).await?;

        // The store refuses anything out of a terminal status.
        if let Err(e) = orders.set_order_status(third, OrderStatus::Aceito).await {
            error!(error = %e, "Status change refused");
        }
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    let view = feed.current();
    let counters = view.counters();
    info!(
        orders = view.orders.len(),
        pending = counters.pending,
        in_progress = counters.in_progress,
        "Feed view"
    );

    let all_orders = system.order_client.list_orders().await?;
    let today = Utc::now().with_timezone(&timezone).date_naive();
    let report = DashboardReport::build(&all_orders, Period::Today, today, timezone, true)?;
    info!(
        period = %report.label,
        sales = %format_brl(report.metrics.total_sales),
        ticket = %format_brl(report.metrics.average_ticket),
        payment = %report.metrics.top_payment_method,
        "Dashboard"
    );
    for product in &report.top_products {
        info!(nome = %product.nome, quantidade = product.quantidade, "Top product");
    }

    feed.unsubscribe().await;
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
