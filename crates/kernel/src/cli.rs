//! Command line interface for the `agora` binary.

use std::path::PathBuf;
use std::sync::Arc;

use agora_kernel::admin::{
    BanLength, DEFAULT_MASS_MAIL_PER_PAGE, DEFAULT_SEARCH_PER_PAGE, Pagination, SortField,
    SortOrder, UserSearch, UserSearchQueryBuilder,
};
use agora_kernel::config::Config;
use agora_kernel::menu::builders::{default_catalog, register_default_builders};
use agora_kernel::menu::{MenuExtension, MenuManager};
use agora_kernel::models::ForumUser;
use agora_kernel::services::Services;
use agora_kernel::tap::TapDispatcher;
use agora_kernel::theme::ThemeEngine;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

/// Agora board tools.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a registered menu to stdout.
    RenderMenu {
        /// Menu name, e.g. user_cp.
        name: String,

        /// TOML file describing the viewing user (default: a guest).
        #[arg(long)]
        user: Option<PathBuf>,
    },

    /// List the preset ban lengths and when a ban placed now would be lifted.
    BanPresets,

    /// Print the SQL for a member search.
    UserSearch {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Primary group id.
        #[arg(long)]
        group: Option<u32>,

        /// Sort column: username, email, regdate, lastvisit or postnum.
        #[arg(long, default_value = "username")]
        sort: String,

        /// Sort descending.
        #[arg(long)]
        desc: bool,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        per_page: Option<u32>,

        /// Select mail recipients instead (skips users who opted out of notices).
        #[arg(long)]
        mass_mail: bool,

        /// Print the COUNT query as well.
        #[arg(long)]
        count: bool,
    },
}

impl Cli {
    pub fn run(self, config: &Config) -> Result<()> {
        match self.command {
            Command::RenderMenu { name, user } => render_menu(config, &name, user),
            Command::BanPresets => ban_presets(config),
            Command::UserSearch {
                username,
                email,
                group,
                sort,
                desc,
                page,
                per_page,
                mass_mail,
                count,
            } => {
                let mut search = if mass_mail {
                    UserSearch::mass_mail()
                } else {
                    UserSearch::default()
                };
                search.username = username;
                search.email = email;
                search.usergroup = group;

                let default_per_page = if mass_mail {
                    DEFAULT_MASS_MAIL_PER_PAGE
                } else {
                    DEFAULT_SEARCH_PER_PAGE
                };
                let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
                let builder = UserSearchQueryBuilder::new(search)
                    .with_sort(SortField::parse_or_default(&sort), order);

                println!("{};", builder.build_page(Pagination::new(page, per_page, default_per_page)));
                if count {
                    println!("{};", builder.build_count());
                }
                Ok(())
            }
        }
    }
}

fn render_menu(config: &Config, name: &str, user: Option<PathBuf>) -> Result<()> {
    let language = Arc::new(config.load_language()?);
    let theme = ThemeEngine::new(&config.template_dir)
        .context("failed to load templates")?
        .with_language(Arc::clone(&language));

    let user = match user {
        Some(path) => ForumUser::from_file(&path)?,
        None => ForumUser::guest(),
    };
    info!(uid = user.uid, menu = %name, "rendering menu");

    let mut services = Services::new();
    services
        .insert(config.load_board_settings()?)
        .insert(user)
        .insert_arc(language);

    let mut manager = MenuManager::new(services);
    register_default_builders(&mut manager)?;
    let catalog = default_catalog();
    for (menu, kind) in &config.menu_builders {
        manager.add_menu_builder_from_catalog(menu.as_str(), kind, &catalog)?;
    }

    let mut extension = MenuExtension::new(manager);
    match extension.render_menu(&theme, &TapDispatcher::empty(), name)? {
        Some(html) => {
            println!("{html}");
            Ok(())
        }
        None => bail!("no menu builder registered for '{name}'"),
    }
}

fn ban_presets(config: &Config) -> Result<()> {
    let language = config.load_language()?;
    let now = Utc::now();

    for preset in BanLength::presets() {
        let lifted = preset
            .length
            .lift_at(now)?
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!("{:<8} {:<12} {lifted}", preset.length.to_string(), preset.label(&language));
    }
    Ok(())
}
