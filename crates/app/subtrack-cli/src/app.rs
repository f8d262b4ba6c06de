use std::sync::Arc;

use anyhow::Result;
use subtrack_auth::{
    AuthGate, AuthManager, LANDING_PATH, MemoryTokenStorage, Navigation, NoopPushRegistrar,
    PushRegistrar, SessionStore,
};
use subtrack_endpoint::EndpointManager;
use subtrack_manager::SubscriptionManager;
use subtrack_notify::Notifier;
use subtrack_settings::AppSettings;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::broadcast::error::RecvError,
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::{
    command::Command,
    push::LogPushRegistrar,
    render,
};

const MAX_REDIRECTS: usize = 5;

pub struct App {
    notifier: Notifier,
    auth: AuthManager,
    gate: AuthGate,
    manager: SubscriptionManager,
    current_path: String,
}

impl App {
    pub fn new(settings: &AppSettings) -> Result<Self> {
        let endpoint = EndpointManager::new(&settings.api.endpoint, settings.api.timeout)?;
        debug!("Using API at {}", endpoint.current_url());

        let notifier = Notifier::with_life(settings.notifications.life);
        let push: Arc<dyn PushRegistrar> = if settings.push.enabled {
            Arc::new(LogPushRegistrar)
        } else {
            Arc::new(NoopPushRegistrar)
        };

        let auth = AuthManager::new(
            Arc::new(endpoint.transport()),
            Arc::new(MemoryTokenStorage::new()),
            SessionStore::new(),
            notifier.clone(),
        )
        .with_push(push);
        let manager = SubscriptionManager::new(auth.transport(), notifier.clone());

        Ok(Self {
            gate: AuthGate::new(auth.clone()),
            notifier,
            auth,
            manager,
            current_path: String::new(),
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let printer = self.spawn_notification_printer();
        self.navigate(LANDING_PATH).await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        loop {
            stdout
                .write_all(format!("{}> ", self.current_path).as_bytes())
                .await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match Command::parse_line(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => {}
                Err(err) => println!("{err}"),
            }
        }

        printer.abort();
        Ok(())
    }

    fn spawn_notification_printer(&self) -> JoinHandle<()> {
        let mut rx = self.notifier.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(notification) => println!("{notification}"),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Dropped {} notifications", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    async fn execute(&mut self, command: Command) {
        match command {
            Command::Login { username, password } => {
                if self.auth.login(username, password).await {
                    self.navigate(LANDING_PATH).await;
                }
            }
            Command::Register { username, password } => {
                if self.auth.register(username, password).await {
                    self.navigate(LANDING_PATH).await;
                }
            }
            Command::Logout => {
                if self.auth.logout().await {
                    self.navigate(subtrack_auth::LOGIN_PATH).await;
                }
            }
            Command::Goto { path } => self.navigate(&path).await,
            Command::Init => self.manager.init_data().await,
            Command::Subscriptions => {
                if let Some(subscriptions) = self.manager.fetch_subscriptions().await {
                    let lines = render::subscription_lines(&subscriptions, |id| {
                        self.manager.category_name(id)
                    });
                    print_lines(&lines, "no subscriptions");
                }
            }
            Command::Categories => {
                if let Some(categories) = self.manager.fetch_categories().await {
                    print_lines(&render::category_lines(&categories), "no categories");
                }
            }
            Command::UserPlans => {
                if let Some(user_plans) = self.manager.fetch_user_plans(None).await {
                    let today = chrono::Local::now().date_naive();
                    let lines: Vec<String> = user_plans
                        .iter()
                        .map(|user_plan| render::user_plan_line(user_plan, today))
                        .collect();
                    print_lines(&lines, "your list is empty");
                }
            }
            Command::Add {
                plan_id,
                payment_date,
                track_usage,
            } => {
                self.manager
                    .add_to_user_plans(plan_id, &payment_date, track_usage)
                    .await;
            }
            Command::Toggle { user_plan_id: id } => {
                let current = self
                    .manager
                    .user_plans()
                    .iter()
                    .find(|user_plan| user_plan.id == id)
                    .map(|user_plan| user_plan.track_usage);
                match current {
                    Some(current) => {
                        self.manager.toggle_usage(id, current).await;
                    }
                    None => println!("user plan #{id} is not in your list, run `plans` first"),
                }
            }
            Command::Remove { user_plan_id: id } => {
                self.manager.delete_user_plan(id).await;
            }
            Command::Quit => {}
        }
    }

    /// Runs the gate, following redirects the way a router would.
    async fn navigate(&mut self, path: &str) {
        let mut target = path.to_string();
        for _ in 0..MAX_REDIRECTS {
            let from = (!self.current_path.is_empty()).then_some(self.current_path.as_str());
            let (route, navigation) = self.gate.navigate_path(&target, from).await;
            match navigation {
                Navigation::Proceed => {
                    println!("-- {} ({})", route.title, route.path);
                    self.current_path = route.path;
                    return;
                }
                Navigation::Redirect(next) => {
                    debug!("Redirected from {} to {}", route.path, next);
                    target = next;
                }
            }
        }
        warn!("Too many redirects navigating to {}", path);
    }
}

fn print_lines(lines: &[String], empty: &str) {
    if lines.is_empty() {
        println!("{empty}");
    }
    for line in lines {
        println!("{line}");
    }
}
