// wapi-cli/src/commands.rs

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tokio::sync::mpsc;

use wapi_common::models::NotificationLevel;
use wapi_common::traits::Repository;
use wapi_core::auth::{GuardDecision, SessionState};
use wapi_core::eventbus::WapiEvent;
use wapi_core::forms::{CampaignForm, IntegrationConfigForm};
use wapi_core::services::{BotFilter, CampaignService, ContactService};
use wapi_core::{DashboardConfig, DashboardContext};

use crate::{AgentAction, BotAction, CampaignAction, Command, InboxAction, IntegrationAction};

pub async fn run(config: DashboardConfig, command: Command, json: bool) -> Result<()> {
    let ctx = DashboardContext::open(config)
        .await
        .context("opening dashboard storage")?;
    let mut toasts = ctx.event_bus.subscribe(None).await;

    let result = dispatch(&ctx, command, json).await;
    print_toasts(&mut toasts);
    ctx.shutdown();
    result
}

async fn dispatch(ctx: &DashboardContext, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            if let SessionState::Authenticated { name, .. } =
                ctx.session.login(&email, &password).await?
            {
                println!("signed in as {name}");
            }
        }
        Command::Logout => {
            let next = ctx.session.logout().await?;
            println!("signed out, next page {next}");
        }
        Command::Status => match ctx.session.mount().await? {
            SessionState::Authenticated { email, name } => println!("{name} <{email}>"),
            _ => println!("not signed in"),
        },
        Command::Route { path } => {
            ctx.session.mount().await?;
            match ctx.session.guard(&path) {
                GuardDecision::Render(page) => println!("render {page}"),
                GuardDecision::Redirect(to) => println!("redirect {to}"),
                GuardDecision::Loading => println!("loading"),
                GuardDecision::NotFound => println!("404"),
            }
        }
        Command::Campaigns { action } => campaigns(ctx, action, json).await?,
        Command::Bots { action } => bots(ctx, action, json).await?,
        Command::Agents { action } => agents(ctx, action, json).await?,
        Command::Integrations { action } => integrations(ctx, action, json).await?,
        Command::Inbox { action } => inbox(ctx, action, json).await?,
        Command::DefaultLabels => {
            let labels = ctx.contact_labels.make_default_labels().await?;
            for l in labels {
                println!("{:<10} {}  {}", l.name, l.color, l.description);
            }
        }
        Command::SampleCsv { dir } => {
            let path = ContactService::write_sample_csv(Path::new(&dir))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn campaigns(ctx: &DashboardContext, action: CampaignAction, json: bool) -> Result<()> {
    let svc = &ctx.campaigns;
    let items = match action {
        CampaignAction::List { search } => svc.search(search.as_deref().unwrap_or("")).await?,
        CampaignAction::Create { name, template, message, schedule, contacts } => {
            let form = CampaignForm {
                name,
                template,
                message,
                scheduled_for: schedule.unwrap_or_default(),
                contacts,
            };
            svc.submit_new(form).await?
        }
        CampaignAction::Schedule { id, when } => {
            let current = svc
                .repo()
                .get(&id)
                .await?
                .ok_or_else(|| anyhow!("no campaign with id {id}"))?;
            let form = CampaignForm { scheduled_for: when, ..CampaignForm::from_campaign(&current) };
            svc.submit_edit(&id, form).await?
        }
        CampaignAction::Status { id, status } => svc.set_status(&id, status).await?,
        CampaignAction::Duplicate { id } => svc.duplicate(&id).await?,
        CampaignAction::Delete { id } => svc.delete(&id).await?,
    };

    if json {
        return print_json(&items);
    }
    for c in &items {
        let (delivered, read) = CampaignService::rates(c);
        println!(
            "{:<16} {:<28} {:<10} {:>5} contacts  {:>5.1}% delivered  {:>5.1}% read",
            c.id, c.name, c.status.to_string(), c.contacts, delivered, read
        );
    }
    Ok(())
}

async fn bots(ctx: &DashboardContext, action: BotAction, json: bool) -> Result<()> {
    let svc = &ctx.reply_bots;
    let items = match action {
        BotAction::List { name, bot_type } => {
            svc.filter(&BotFilter { name, bot_type, date: String::new() }).await?
        }
        BotAction::Toggle { id } => svc.toggle(&id).await?,
        BotAction::Duplicate { id } => svc.duplicate(&id).await?,
        BotAction::Delete { id } => svc.delete(&id).await?,
        BotAction::Match { text } => {
            match svc.responder_for(&text).await? {
                Some(bot) => println!("{}: {}", bot.name, bot.response_message),
                None => println!("no enabled bot matches"),
            }
            return Ok(());
        }
    };

    if json {
        return print_json(&items);
    }
    for b in &items {
        println!(
            "{:<16} {:<24} {:<8} {:<3} {}",
            b.id,
            b.name,
            b.bot_type.to_string(),
            if b.enabled { "on" } else { "off" },
            b.keywords.join(", ")
        );
    }
    Ok(())
}

async fn agents(ctx: &DashboardContext, action: AgentAction, json: bool) -> Result<()> {
    let svc = &ctx.agents;
    let items = match action {
        AgentAction::List => svc.list().await?,
        AgentAction::Toggle { id } => svc.toggle(&id).await?,
        AgentAction::Stats => {
            let stats = svc.stats().await?;
            if json {
                return print_json(&stats);
            }
            println!(
                "{} agents, {} active, {} chats, {:.1} min avg response",
                stats.total, stats.active, stats.total_chats, stats.avg_response_time
            );
            return Ok(());
        }
    };

    if json {
        return print_json(&items);
    }
    for a in &items {
        println!("{:<16} {:<24} {:<24} {:?}", a.id, a.name, a.email, a.status);
    }
    Ok(())
}

async fn integrations(ctx: &DashboardContext, action: IntegrationAction, json: bool) -> Result<()> {
    let svc = &ctx.integrations;
    let items = match action {
        IntegrationAction::List { page } => {
            let page = svc.page(page).await?;
            if json {
                return print_json(&page);
            }
            let (from, to, total) = page.showing();
            for i in &page.items {
                println!(
                    "{:<4} {:<14} {:<12} {:<14} {}",
                    i.id,
                    i.name,
                    i.status.to_string(),
                    i.category,
                    i.last_sync.as_deref().unwrap_or("-")
                );
            }
            println!("showing {from} to {to} of {total}, page {}/{}", page.page, page.total_pages);
            return Ok(());
        }
        IntegrationAction::Connect { id, api_key, webhook_url, settings } => {
            let prefilled = svc.connect(&id).await?;
            let form = IntegrationConfigForm {
                api_key,
                webhook_url,
                enabled: true,
                custom_settings: if settings.is_empty() { prefilled.custom_settings } else { settings },
            };
            svc.save_config(&id, form).await?
        }
        IntegrationAction::Disconnect { id } => svc.disconnect(&id).await?,
        IntegrationAction::Test { id } => svc.test_connection(&id).await?,
        IntegrationAction::Sync { id } => svc.sync(&id).await?,
    };

    if json {
        return print_json(&items);
    }
    for i in &items {
        println!("{:<4} {:<14} {}", i.id, i.name, i.status);
    }
    Ok(())
}

async fn inbox(ctx: &DashboardContext, action: InboxAction, json: bool) -> Result<()> {
    let svc = &ctx.inbox;
    match action {
        InboxAction::List { tab, search } => {
            let items = svc.conversations(tab, &search).await?;
            if json {
                return print_json(&items);
            }
            for (t, n) in svc.tab_counts().await? {
                print!("{t}: {n}  ");
            }
            println!();
            for c in &items {
                println!(
                    "{:<4} {:<20} {:>3} unread  {}",
                    c.id, c.name, c.unread_count, c.last_message
                );
            }
        }
        InboxAction::Send { id, text } => {
            let Some(sent) = svc.send_message(&id, &text).await? else {
                println!("nothing to send");
                return Ok(());
            };
            // stay around until the message reads as read
            sent.receipts.await.context("receipt task")?;
            println!("message {} read", sent.message_id);
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_toasts(rx: &mut mpsc::Receiver<WapiEvent>) {
    while let Ok(event) = rx.try_recv() {
        if let WapiEvent::Notification(n) = event {
            let tag = match n.level {
                NotificationLevel::Success => "ok",
                NotificationLevel::Info => "info",
                NotificationLevel::Error => "error",
            };
            eprintln!("[{tag}] {}", n.message);
        }
    }
}
