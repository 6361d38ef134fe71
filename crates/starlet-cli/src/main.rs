//! Starlet CLI - render and serve the star rating story gallery.

#![allow(
    clippy::needless_pass_by_value,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::needless_raw_string_hashes
)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use starlet::widgets::RatingTheme;
use starlet::StoryBook;
use std::fs;
use std::path::{Path, PathBuf};
use tiny_http::{Header, Response, Server};

#[derive(Parser)]
#[command(name = "starlet")]
#[command(about = "Star rating component gallery")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stories in the gallery
    List {
        /// Print the full catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the gallery, or a single story, to HTML
    Render {
        /// Only render this story
        #[arg(short, long)]
        story: Option<String>,

        /// Theme file (TOML) applied to every story
        #[arg(short, long)]
        theme: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Serve the gallery over HTTP
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Theme file (TOML) applied to every story
        #[arg(short, long)]
        theme: Option<PathBuf>,

        /// wasm-pack output directory; enables live elements
        #[arg(long)]
        pkg: Option<PathBuf>,
    },

    /// Validate a theme file and print its stylesheet
    Theme {
        /// Theme file (TOML)
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List { json } => list(json),
        Commands::Render { story, theme, out } => render(story.as_deref(), theme.as_deref(), out),
        Commands::Serve { port, theme, pkg } => serve(port, theme.as_deref(), pkg),
        Commands::Theme { path } => {
            let theme = RatingTheme::from_toml_file(&path)
                .with_context(|| format!("invalid theme {}", path.display()))?;
            print!("{}", theme.stylesheet());
            Ok(())
        }
    }
}

fn load_book(theme: Option<&Path>) -> Result<StoryBook> {
    let theme = match theme {
        Some(path) => RatingTheme::from_toml_file(path)
            .with_context(|| format!("failed to load theme {}", path.display()))?,
        None => RatingTheme::default(),
    };
    StoryBook::new(&theme).context("failed to build story book")
}

fn list(json: bool) -> Result<()> {
    let book = load_book(None)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }
    for story in book.stories() {
        println!("{:<24} {} ({} widgets)", story.name, story.title, story.entries.len());
    }
    Ok(())
}

fn render(story: Option<&str>, theme: Option<&Path>, out: Option<PathBuf>) -> Result<()> {
    let book = load_book(theme)?;
    let html = match story {
        Some(name) => book.render_story(name)?,
        None => book.render_gallery(),
    };
    match out {
        Some(path) => {
            fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// Loads the wasm module, mounts every element and wires the interactive
/// demo's mirror.
const LIVE_SCRIPT: &str = r#"
<script type="module">
import init, { upgrade_all } from '/pkg/starlet.js';
await init();
upgrade_all();
const source = document.getElementById('interactive-rating');
const mirror = document.getElementById('readonly-display');
if (source && mirror) {
    source.addEventListener('rating', (e) => mirror.setAttribute('rating', e.detail.rating));
}
</script>
"#;

/// Insert `script` before `</body>`, or append it.
fn inject_script(html: &str, script: &str) -> String {
    match html.rfind("</body>") {
        Some(pos) => format!("{}{script}{}", &html[..pos], &html[pos..]),
        None => format!("{html}{script}"),
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("ts") => "application/typescript",
        _ => "application/octet-stream",
    }
}

/// What a request path resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    Gallery,
    Story(String),
    Asset(PathBuf),
    NotFound,
}

fn route(url: &str, pkg: Option<&Path>) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    if path == "/" || path == "/index.html" {
        return Route::Gallery;
    }
    if let Some(name) = path.strip_prefix("/story/") {
        return Route::Story(name.trim_end_matches('/').to_string());
    }
    match (path.strip_prefix("/pkg/"), pkg) {
        (Some(rest), Some(dir)) if !rest.split('/').any(|c| c == ".." || c.is_empty()) => {
            Route::Asset(dir.join(rest))
        }
        _ => Route::NotFound,
    }
}

fn respond_html(html: String) -> Result<Response<std::io::Cursor<Vec<u8>>>> {
    Ok(Response::from_data(html.into_bytes()).with_header(header("text/html; charset=utf-8")?))
}

fn header(content_type: &str) -> Result<Header> {
    Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid content type {content_type:?}"))
}

fn serve(port: u16, theme: Option<&Path>, pkg: Option<PathBuf>) -> Result<()> {
    let book = load_book(theme)?;
    if let Some(dir) = &pkg {
        if !dir.join("starlet.js").is_file() {
            bail!("{} has no starlet.js; run wasm-pack build first", dir.display());
        }
    }

    let addr = format!("0.0.0.0:{port}");
    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    println!("Serving star rating gallery at http://localhost:{port}");
    if pkg.is_none() {
        println!("  Static mode: pass --pkg <dir> for interactive elements");
    }
    println!("Press Ctrl+C to stop");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let response = match route(&url, pkg.as_deref()) {
            Route::Gallery => {
                let page = book.render_gallery();
                let page = if pkg.is_some() {
                    inject_script(&page, LIVE_SCRIPT)
                } else {
                    page
                };
                respond_html(page)?
            }
            Route::Story(name) => match book.render_story(&name) {
                Ok(fragment) => respond_html(fragment)?,
                Err(err) => Response::from_string(err.to_string()).with_status_code(404),
            },
            Route::Asset(path) if path.is_file() => match fs::read(&path) {
                Ok(content) => Response::from_data(content).with_header(header(content_type(&path))?),
                Err(err) => {
                    log::warn!("failed to read {}: {err}", path.display());
                    Response::from_string("500 Internal Server Error").with_status_code(500)
                }
            },
            Route::Asset(_) | Route::NotFound => {
                Response::from_string("404 Not Found").with_status_code(404)
            }
        };
        log::info!("{} {} -> {}", request.method(), url, response.status_code().0);
        if let Err(err) = request.respond(response) {
            log::warn!("failed to respond to {url}: {err}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Routing Tests
    // ==========================================================================

    #[test]
    fn test_route_gallery() {
        assert_eq!(route("/", None), Route::Gallery);
        assert_eq!(route("/index.html?x=1", None), Route::Gallery);
    }

    #[test]
    fn test_route_story() {
        assert_eq!(route("/story/custom-colors", None), Route::Story("custom-colors".into()));
        assert_eq!(route("/story/default/", None), Route::Story("default".into()));
    }

    #[test]
    fn test_route_assets_need_pkg() {
        assert_eq!(route("/pkg/starlet.js", None), Route::NotFound);
        let pkg = Path::new("out");
        assert_eq!(
            route("/pkg/starlet_bg.wasm", Some(pkg)),
            Route::Asset(pkg.join("starlet_bg.wasm"))
        );
    }

    #[test]
    fn test_route_rejects_traversal() {
        let pkg = Path::new("out");
        assert_eq!(route("/pkg/../Cargo.toml", Some(pkg)), Route::NotFound);
        assert_eq!(route("/pkg//etc", Some(pkg)), Route::NotFound);
        assert_eq!(route("/other", Some(pkg)), Route::NotFound);
    }

    // ==========================================================================
    // Page Tests
    // ==========================================================================

    #[test]
    fn test_inject_script_before_body() {
        let html = "<html><body><p>x</p></body></html>";
        let result = inject_script(html, "<script></script>");
        assert_eq!(result, "<html><body><p>x</p><script></script></body></html>");
    }

    #[test]
    fn test_inject_script_without_body() {
        assert_eq!(inject_script("<p>x</p>", "<s>"), "<p>x</p><s>");
    }

    #[test]
    fn test_live_script_mirrors_interactive_demo() {
        assert!(LIVE_SCRIPT.contains("interactive-rating"));
        assert!(LIVE_SCRIPT.contains("readonly-display"));
        assert!(LIVE_SCRIPT.contains("upgrade_all()"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("starlet_bg.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("starlet.js")), "application/javascript");
        assert_eq!(content_type(Path::new("a.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_load_book_default_theme() {
        let book = load_book(None).unwrap();
        assert_eq!(book.stories().len(), 10);
    }

    #[test]
    fn test_load_book_missing_theme() {
        let err = load_book(Some(Path::new("/nonexistent/theme.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load theme"));
    }

    #[test]
    fn test_load_book_from_theme_file() {
        let path = std::env::temp_dir().join(format!("starlet-theme-{}.toml", std::process::id()));
        fs::write(&path, "star-color = \"#112233\"\n").unwrap();
        let book = load_book(Some(&path)).unwrap();
        fs::remove_file(&path).ok();
        let widget = &book.get("default").unwrap().entries[0].widget;
        assert_eq!(widget.get_theme().star_color.to_hex(), "#112233");
    }
}
