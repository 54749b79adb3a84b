use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Confirm, Select, theme::ColorfulTheme};

use tracing::{error, info, warn};

use crate::{
    catalog::HttpCatalogSource,
    cli::args::*,
    models::product::ProductId,
    services::{BasketAction, CatalogService, ShopError, ShopService},
    utils::{
        formatting::{format_basket, format_catalog_table, format_date, format_total},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

const MENU: [&str; 4] = [
    "Fetch products",
    "Add a product to the basket",
    "Remove a product from the basket",
    "Quit",
];

pub struct CliApp {
    shop: ShopService,
}

impl CliApp {
    pub fn new(config: &Config) -> Result<Self> {
        let source = HttpCatalogSource::new(config.catalog_endpoint()?)
            .context("Failed to initialize HTTP client")?;
        info!("Using product catalog at {}", source.endpoint());

        let catalog_service = CatalogService::new(Arc::new(source));

        Ok(Self::with_shop(ShopService::new(catalog_service)))
    }

    pub fn with_shop(shop: ShopService) -> Self {
        Self { shop }
    }

    pub async fn run(&mut self, args: Args) -> Result<()> {
        match args.command.unwrap_or(Commands::Shop) {
            Commands::Shop => self.handle_shop().await,
            Commands::Catalog => self.handle_catalog().await,
            Commands::Quote { actions } => self.handle_quote(actions).await,
        }
    }

    // Interactive session
    async fn handle_shop(&mut self) -> Result<()> {
        println!("{} {}", CART, style("My basket demo").bold().cyan());

        let theme = ColorfulTheme::default();

        loop {
            self.render();

            let choice = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => self.handle_fetch().await,
                1 => self.prompt_select(&theme)?,
                2 => self.prompt_remove(&theme)?,
                _ => {
                    if self.shop.basket().is_empty() {
                        break;
                    }
                    let confirm = Confirm::with_theme(&theme)
                        .with_prompt("Your basket is not empty. Quit anyway?")
                        .default(false)
                        .interact()?;
                    if confirm {
                        break;
                    }
                }
            }
        }

        info!("Shopping session ended");
        Ok(())
    }

    async fn handle_fetch(&mut self) {
        match self.shop.trigger_fetch().await {
            Ok(count) => {
                println!("{} Loaded {} products", CHECKMARK, style(count).green());
            }
            Err(e) => {
                println!("{} {}", WARNING, style(&e).yellow());
                if !self.shop.catalog().is_empty() {
                    println!("Showing the previously loaded catalog");
                }
            }
        }
    }

    fn prompt_select(&mut self, theme: &ColorfulTheme) -> Result<()> {
        if self.shop.catalog().is_empty() {
            println!("{} Fetch products first", INFO);
            return Ok(());
        }

        let items: Vec<String> = self
            .shop
            .catalog()
            .products()
            .iter()
            .map(|product| format!("{} ({}$)", product.title, product.price))
            .collect();
        let index = Select::with_theme(theme)
            .with_prompt("Add which product?")
            .items(&items)
            .default(0)
            .interact()?;

        let product_id = self.shop.catalog().products()[index].id;
        self.dispatch(BasketAction::Select { id: product_id, times: 1 });
        Ok(())
    }

    fn prompt_remove(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let lines: Vec<(ProductId, String)> = self
            .shop
            .basket()
            .lines()
            .map(|(info, quantity)| (info.id, format!("{}x {}", quantity, info.title)))
            .collect();
        if lines.is_empty() {
            println!("{} Your basket is empty", INFO);
            return Ok(());
        }

        let items: Vec<&str> = lines.iter().map(|(_, label)| label.as_str()).collect();
        let index = Select::with_theme(theme)
            .with_prompt("Remove which product?")
            .items(&items)
            .default(0)
            .interact()?;

        self.dispatch(BasketAction::Remove { id: lines[index].0, times: 1 });
        Ok(())
    }

    fn dispatch(&mut self, action: BasketAction) {
        match self.shop.apply(action) {
            Ok(quantity) => {
                info!("Applied {:?}, quantity now {}", action, quantity);
            }
            Err(ShopError::UnknownProduct(id)) => {
                println!("{} Product {} is not in the catalog", CROSS, style(id).red());
                warn!("Skipped action for unknown product {}", id);
            }
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("Basket action failed: {}", e);
            }
        }
    }

    fn render(&mut self) {
        println!();
        println!("{}", style("Products").bold().underlined());
        if let Some(fetched_at) = self.shop.catalog().fetched_at() {
            println!("{}", style(format!("fetched {}", format_date(&fetched_at))).dim());
        }
        println!("{}", format_catalog_table(self.shop.catalog()));

        println!();
        println!("{}", style("My current basket").bold().underlined());
        let basket = format_basket(self.shop.basket());
        if !basket.is_empty() {
            println!("{}", basket);
        }

        println!();
        println!("{}", style("My current invoice").bold().underlined());
        let total = self.shop.invoice_total();
        println!("{}", format_total(&total));
        println!();
    }

    // One-shot commands
    async fn handle_catalog(&mut self) -> Result<()> {
        self.handle_fetch().await;
        println!("{}", format_catalog_table(self.shop.catalog()));
        Ok(())
    }

    async fn handle_quote(&mut self, actions: Vec<BasketAction>) -> Result<()> {
        self.handle_fetch().await;
        if self.shop.catalog().is_empty() {
            println!("{} No catalog available, nothing to quote", WARNING);
            return Ok(());
        }

        for action in actions {
            self.dispatch(action);
        }

        println!(
            "{} {} ({} items)",
            CART,
            style("My current basket").bold().cyan(),
            self.shop.basket().item_count()
        );
        let basket = format_basket(self.shop.basket());
        if basket.is_empty() {
            println!("{} Your basket is empty", INFO);
        } else {
            println!("{}", basket);
        }

        let total = self.shop.invoice_total();
        println!("{}", format_total(&total));
        Ok(())
    }

    pub fn shop(&self) -> &ShopService {
        &self.shop
    }

    pub fn shop_mut(&mut self) -> &mut ShopService {
        &mut self.shop
    }
}
