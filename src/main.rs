mod config;
mod quiz;
mod terminal;

use dotenv::dotenv;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};

use config::{Config, OutputMode};
use quiz::controller::QuizController;
use quiz::view::ViewModel;
use terminal::Command;

type AppResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> AppResult {
    // A missing .env is fine, everything has a default
    dotenv().ok();

    pretty_env_logger::init();
    info!("Starting math quiz...");

    let config = Config::from_env();
    debug!("{:?}", config);

    let mut controller = QuizController::start(config.rng());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        present(&mut stdout, &controller.view(), config.output).await?;

        tokio::select! {
            Some(event) = controller.next_alarm() => {
                controller.dispatch(event);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match terminal::parse_command(&line, &controller.view()) {
                    Some(Command::Play(event)) => {
                        controller.dispatch(event);
                    }
                    Some(Command::Quit) => break,
                    None => debug!("Not a command: {:?}", line),
                }
            }
        }
    }

    info!(
        "Leaving with {}/{}",
        controller.session().score(),
        controller.session().total_questions()
    );
    Ok(())
}

async fn present(stdout: &mut Stdout, view: &ViewModel, output: OutputMode) -> AppResult {
    let frame = match output {
        OutputMode::Text => terminal::draw(view),
        OutputMode::Json => {
            let mut line = serde_json::to_string(view)?;
            line.push('\n');
            line
        }
    };
    stdout.write_all(frame.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
