use crate::models::interval::ViewKind;
use crate::models::session::ViewState;
use crate::App;

const ACCOUNT_HELP: &str = "\
🔐 Account
  login <username> <password>                       Log in
  show-signup                                       Switch to the signup form
  signup <username> <email> <password> <confirm>    Create an account and log in
  show-login                                        Back to the login form
  logout                                            Log out";

const RATES_HELP: &str = "\
📈 Predictions
  options                Load tickers and intervals from the server
  interval <label...>    Choose an interval by its label
  rows <n>               Number of rows to request
  submit                 Fetch predictions and redraw the charts";

const INTERACTIVE_HELP: &str = "\
  pairs                  List base currencies and the quotes for the current base
  base <CCY>             Choose the base currency (resets the quote)
  quote <CCY>            Choose the quote currency";

const STATIC_HELP: &str = "\
  ticker <TICKER>        Choose a ticker offered by the server";

pub fn execute(app: &App) -> Result<(), String> {
    println!("📖 fxpredict commands ({} view, {} client)", app.session.view(), app.view);
    println!("{}", ACCOUNT_HELP);

    if app.session.view() == ViewState::Main {
        println!("{}", RATES_HELP);
        match app.view {
            ViewKind::Interactive => println!("{}", INTERACTIVE_HELP),
            ViewKind::Static => println!("{}", STATIC_HELP),
        }
    }

    println!("🎯 General\n  help                   Show this message\n  quit | exit            Leave");
    Ok(())
}
