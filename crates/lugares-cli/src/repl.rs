//! Interactive session: one line of input is one user intent.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use lugares_app::view::{ResultsView, SUGGESTIONS};
use lugares_app::{App, AppEvent};
use lugares_places::{CatalogSearch, Geolocator};

use crate::render;

pub(crate) type CliApp = App<Geolocator, CatalogSearch>;

pub(crate) const HELP: &str = "\
commands:
  locate              request or refresh your location
  type <text>         edit the search field without searching
  suggest <n>         fill the search field from suggestion n
  search [text]       search for text (or the current field)
  category <name>     search a welcome-screen category
  retry               repeat the last search
  fav <id>            toggle a result as favorite
  unfav <id>          remove a favorite
  favs                show the favorites panel
  clear               remove all favorites
  share               share the favorites list
  call <id>           call a place
  more <id>           details for a favorite
  show                redraw the page
  help                this text
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Intent {
    Locate,
    Type(String),
    Suggest(usize),
    Search(Option<String>),
    Category(String),
    Retry,
    Fav(String),
    Unfav(String),
    Favorites,
    Clear,
    Share,
    Call(String),
    More(String),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines are `Show`.
pub(crate) fn parse_intent(line: &str) -> anyhow::Result<Intent> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let required = |what: &str| -> anyhow::Result<String> {
        if rest.is_empty() {
            anyhow::bail!("`{command}` needs {what}");
        }
        Ok(rest.to_string())
    };

    let intent = match command {
        "" | "show" => Intent::Show,
        "locate" => Intent::Locate,
        "type" => Intent::Type(rest.to_string()),
        "suggest" => {
            let n: usize = required("a suggestion number")?
                .parse()
                .map_err(|_| anyhow::anyhow!("suggestion must be a number"))?;
            if n == 0 || n > SUGGESTIONS.len() {
                anyhow::bail!("suggestion must be between 1 and {}", SUGGESTIONS.len());
            }
            Intent::Suggest(n - 1)
        }
        "search" => Intent::Search((!rest.is_empty()).then(|| rest.to_string())),
        "category" => Intent::Category(required("a category name")?),
        "retry" => Intent::Retry,
        "fav" => Intent::Fav(required("a place id")?),
        "unfav" => Intent::Unfav(required("a place id")?),
        "favs" => Intent::Favorites,
        "clear" => Intent::Clear,
        "share" => Intent::Share,
        "call" => Intent::Call(required("a place id")?),
        "more" => Intent::More(required("a place id")?),
        "help" => Intent::Help,
        "quit" | "exit" => Intent::Quit,
        other => anyhow::bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(intent)
}

/// Apply events until neither a location request nor a search is pending.
pub(crate) async fn settle(app: &mut CliApp, rx: &mut mpsc::UnboundedReceiver<AppEvent>) {
    while app.location().is_pending() || app.results().is_pending() {
        match rx.recv().await {
            Some(event) => app.apply(event),
            None => break,
        }
    }
}

/// Carry out one intent and return the text to show, or `None` to quit.
pub(crate) fn dispatch(app: &mut CliApp, intent: Intent) -> Option<String> {
    let output = match intent {
        Intent::Quit => return None,
        Intent::Help => HELP.to_string(),
        Intent::Show => page(app),
        Intent::Locate => {
            app.request_location();
            page(app)
        }
        Intent::Type(text) => {
            app.set_query(text);
            page(app)
        }
        Intent::Suggest(index) => {
            if let Some(chip) = SUGGESTIONS.get(index) {
                app.apply_suggestion(chip);
            }
            page(app)
        }
        Intent::Search(text) => {
            if let Some(text) = text {
                app.set_query(text);
            }
            if app.submit_search() {
                page(app)
            } else if app.location().coordinate().is_none() {
                "A location is needed before searching (try `locate`).".to_string()
            } else {
                "Type something to search for.".to_string()
            }
        }
        Intent::Category(label) => {
            app.search_category(&label);
            page(app)
        }
        Intent::Retry => {
            if app.retry_search() {
                page(app)
            } else {
                "Nothing to retry.".to_string()
            }
        }
        Intent::Fav(id) => match app.toggle_favorite(&id) {
            Some(_) => page(app),
            None => format!("No place with id `{id}` in the results or favorites."),
        },
        Intent::Unfav(id) => match app.remove_favorite(&id) {
            Some(_) => render::favorites_panel(&app.view().favorites),
            None => format!("`{id}` is not a favorite."),
        },
        Intent::Favorites => render::favorites_panel(&app.view().favorites),
        Intent::Clear => {
            app.clear_favorites();
            render::favorites_panel(&app.view().favorites)
        }
        Intent::Share => {
            if app.favorites().is_empty() {
                "No favorites to share.".to_string()
            } else {
                "Sharing lists is not available yet.".to_string()
            }
        }
        Intent::Call(id) => call(app, &id),
        Intent::More(id) => see_more(app, &id),
    };
    Some(output)
}

fn page(app: &CliApp) -> String {
    render::page(&app.view())
}

fn call(app: &CliApp, id: &str) -> String {
    let ResultsView::Grid(cards) = app.view().results else {
        return format!("No result with id `{id}`.");
    };
    match cards.iter().find(|c| c.id == id) {
        Some(card) if card.call_action => format!("Calling {} is not available yet.", card.name),
        Some(card) => format!("{} has no call action.", card.name),
        None => format!("No result with id `{id}`."),
    }
}

fn see_more(app: &CliApp, id: &str) -> String {
    let panel = app.view().favorites;
    match panel.items.iter().find(|item| item.id == id) {
        Some(item) if item.see_more_action => {
            format!("Details for {} are not available yet.", item.name)
        }
        Some(item) => format!("{} has no details action.", item.name),
        None => format!("`{id}` is not a favorite."),
    }
}

/// Run the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading stdin fails.
pub(crate) async fn run(
    mut app: CliApp,
    mut rx: mpsc::UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    app.start();
    println!("{}", render::page(&app.view()));
    println!("(type `help` for commands)");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_intent(&line) {
                    Ok(intent) => match dispatch(&mut app, intent) {
                        Some(output) => println!("{output}"),
                        None => break,
                    },
                    Err(err) => println!("{err}"),
                }
            }
            Some(event) = rx.recv() => {
                app.apply(event);
                println!("{}", render::page(&app.view()));
            }
        }
    }

    tracing::info!(favorites = app.favorites().len(), "session ended");
    Ok(())
}
