use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Campus CLI - administer a running Campus API server")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CAMPUS_SERVER_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the Campus API server"
    )]
    pub server: String,

    #[arg(long, global = true, env = "CAMPUS_TOKEN", help = "JWT for protected commands")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output raw JSON instead of text")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check server health")]
    Health,

    #[command(about = "Show server information from the root endpoint")]
    Info,

    #[command(about = "Authenticate and print a JWT")]
    Login {
        #[arg(help = "Tenant name")]
        tenant: String,
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Password")]
        password: String,
    },

    #[command(about = "Tenant registry management (superadmin token required)")]
    Tenant {
        #[command(subcommand)]
        cmd: TenantCommands,
    },
}

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "List all tenants")]
    List,

    #[command(about = "Create a tenant with its first admin user")]
    Create {
        #[arg(help = "Tenant name")]
        name: String,
        #[arg(help = "Admin username")]
        admin_username: String,
        #[arg(help = "Admin password")]
        admin_password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Client::new(&cli.server, cli.token.as_deref());

    let body = match cli.command {
        Commands::Health => client.get("/health").await?,
        Commands::Info => client.get("/").await?,
        Commands::Login { ref tenant, ref username, ref password } => {
            client
                .post(
                    "/auth/login",
                    serde_json::json!({ "tenant": tenant, "username": username, "password": password }),
                )
                .await?
        }
        Commands::Tenant { cmd: TenantCommands::List } => client.get("/api/admin/tenants").await?,
        Commands::Tenant {
            cmd: TenantCommands::Create { ref name, ref admin_username, ref admin_password },
        } => {
            client
                .post(
                    "/api/admin/tenants",
                    serde_json::json!({
                        "name": name,
                        "admin_username": admin_username,
                        "admin_password": admin_password
                    }),
                )
                .await?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_text(&cli.command, &body);
    }

    Ok(())
}

fn print_text(command: &Commands, body: &Value) {
    match command {
        Commands::Health => {
            let status = body["data"]["status"].as_str().unwrap_or("unknown");
            println!("server: {}", status);
        }
        Commands::Login { .. } => {
            match body["data"]["token"].as_str() {
                Some(token) => println!("{}", token),
                None => println!("{}", body),
            }
        }
        Commands::Tenant { cmd: TenantCommands::List } => {
            if let Some(tenants) = body["data"].as_array() {
                for t in tenants {
                    println!(
                        "{}  {}  active={}",
                        t["id"].as_str().unwrap_or("-"),
                        t["name"].as_str().unwrap_or("-"),
                        t["is_active"]
                    );
                }
            } else {
                println!("{}", body);
            }
        }
        _ => println!("{}", serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())),
    }
}

struct Client {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
            http: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> anyhow::Result<Value> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        Self::into_body(resp).await
    }

    async fn post(&self, path: &str, payload: Value) -> anyhow::Result<Value> {
        let mut req = self.http.post(format!("{}{}", self.base_url, path)).json(&payload);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        Self::into_body(resp).await
    }

    async fn into_body(resp: reqwest::Response) -> anyhow::Result<Value> {
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if !status.is_success() && body["success"] != Value::Bool(true) {
            let message = body["message"].as_str().unwrap_or("request failed");
            anyhow::bail!("{} ({})", message, status);
        }

        Ok(body)
    }
}
