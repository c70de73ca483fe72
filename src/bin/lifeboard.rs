//! A command-line front-end to the dashboard API.
//!
//! Set `LIFEBOARD_BACKEND_URL` to the API to use, and `RUST_LOG` to display more info.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use lifeboard::app::{App, SessionContext};
use lifeboard::calendar::{RescheduleIntent, YearMonth};
use lifeboard::client::Client;
use lifeboard::config;
use lifeboard::sections::{
    AgendaSection, AssistantSection, ContactsSection, DashboardSection,
    GoalsSection, NotesSection, RescheduleOutcome, TasksSection,
};
use lifeboard::session::FileStorage;
use lifeboard::utils::print_grid;
use lifeboard::{BoxError, ItemId, Timestamp};

const USAGE: &str = "Usage: lifeboard <command> [arguments]

Commands:
    login <name> <email>            sign in
    logout                          sign out
    whoami                          show who is signed in
    dashboard                       show the daily overview
    agenda [YYYY-MM]                show the events of a month (the current one by default)
    move <event id> <YYYY-MM-DD>    move an event to another day
    add-event <title> <start> <end> add an event
    plan                            ask the AI for a weekly plan
    tasks                           list the tasks
    add-task <title>                add a task
    prioritize                      ask the AI to prioritize the tasks
    goals                           list the goals
    review                          ask the AI to review the goals
    contacts                        list the contacts
    notes                           list the notes
    add-note <title> <content>      add a note
    ask [prompt]                    ask the central assistant";


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<(), BoxError> {
    let command = match args.first() {
        None => {
            println!("{}", USAGE);
            return Ok(());
        },
        Some(c) => c.as_str(),
    };
    let params = &args[1..];

    let client = Client::from_config()?;
    log::debug!("Using the API at {}", client.base_url());
    let mut app = App::new(Arc::new(client), FileStorage::new(&config::data_dir()));

    match command {
        "login" => {
            let (name, email) = (arg(params, 0, "name")?, arg(params, 1, "email")?);
            let ctx = app.login(name, email).await?;
            println!("Signed in as {} <{}>", ctx.session().name, ctx.session().email);
            return Ok(());
        },
        "logout" => {
            app.logout();
            println!("Signed out");
            return Ok(());
        },
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            return Ok(());
        },
        _ => (),
    }

    let ctx = match app.context() {
        None => return Err("Nobody is signed in. Use `lifeboard login <name> <email>` first".into()),
        Some(ctx) => ctx,
    };

    match command {
        "whoami" => {
            let session = ctx.session();
            println!("{} <{}> (user {})", session.name, session.email, session.user_id);
        },
        "dashboard" => show_dashboard(ctx).await,
        "agenda" => {
            let month = match params.first() {
                Some(m) => m.parse::<YearMonth>()?,
                None => YearMonth::containing(Local::now().date_naive()),
            };
            show_agenda(ctx, month).await;
        },
        "move" => {
            let id = ItemId::from(arg(params, 0, "event id")?);
            let date = NaiveDate::parse_from_str(arg(params, 1, "date")?, "%Y-%m-%d")?;
            move_event(ctx, RescheduleIntent::new(id, date)).await?;
        },
        "add-event" => {
            let title = arg(params, 0, "title")?;
            // Times without an offset are local times
            let start = Timestamp::parse(arg(params, 1, "start")?)?.to_utc_in(&Local);
            let end = Timestamp::parse(arg(params, 2, "end")?)?.to_utc_in(&Local);
            let agenda = AgendaSection::new(ctx);
            println!("{:?}", agenda.add_event(title, start, end).await?);
        },
        "plan" => {
            let agenda = AgendaSection::new(ctx);
            agenda.weekly_plan().await?;
            println!("{}", agenda.plan_text());
        },
        "tasks" => {
            let tasks = TasksSection::new(ctx);
            tasks.load().await;
            for task in tasks.display_order() {
                println!("  [{}] {}\t{}", if task.completed() { "x" } else { " " }, task.title(), task.priority_label());
            }
        },
        "add-task" => {
            let tasks = TasksSection::new(ctx);
            println!("{:?}", tasks.add_task(&params.join(" ")).await?);
        },
        "prioritize" => {
            let tasks = TasksSection::new(ctx);
            tasks.load().await;
            tasks.prioritize().await?;
            println!("Top priorities:");
            for title in tasks.top_priorities() {
                println!("  * {}", title);
            }
        },
        "goals" => {
            let goals = GoalsSection::new(ctx);
            goals.load().await;
            for goal in goals.goals() {
                println!("  {:>3}%  {}", goal.progress().round(), goal.title());
            }
            println!("Average progress: {}%", goals.overall_progress());
        },
        "review" => {
            let goals = GoalsSection::new(ctx);
            goals.review().await?;
            println!("{}", goals.review_text());
        },
        "contacts" => {
            let contacts = ContactsSection::new(ctx);
            contacts.load().await;
            for (name, detail, birthday) in contacts.entries() {
                match birthday {
                    Some(date) => println!("  {}\t{}\t(birthday: {})", name, detail, date.format("%d/%m")),
                    None => println!("  {}\t{}", name, detail),
                }
            }
        },
        "notes" => {
            let notes = NotesSection::new(ctx);
            notes.load().await;
            for note in notes.newest_first() {
                println!("# {}\n{}\n", note.title(), note.content());
            }
        },
        "add-note" => {
            let notes = NotesSection::new(ctx);
            let title = arg(params, 0, "title")?;
            let content = params.get(1..).map(|p| p.join(" ")).unwrap_or_default();
            println!("{:?}", notes.add_note(title, &content).await?);
        },
        "ask" => {
            let mut assistant = AssistantSection::new(ctx);
            if params.is_empty() == false {
                assistant.set_prompt(params.join(" "));
            }
            assistant.run().await?;
            println!("{}", assistant.result_text());
        },
        other => return Err(format!("Unknown command `{}`\n\n{}", other, USAGE).into()),
    }
    Ok(())
}

fn arg<'a>(params: &'a [String], index: usize, name: &str) -> Result<&'a str, BoxError> {
    match params.get(index) {
        Some(value) => Ok(value.as_str()),
        None => Err(format!("Missing argument: <{}>\n\n{}", name, USAGE).into()),
    }
}

async fn show_dashboard(ctx: SessionContext<Client>) {
    let dashboard = DashboardSection::new(ctx);
    dashboard.load().await;
    let data = match dashboard.dashboard() {
        None => {
            println!("No data yet.");
            return;
        },
        Some(d) => d,
    };

    if let Some(energy) = &data.energy {
        println!("Energy: {}", energy);
    }
    println!("AI recommendations:");
    for r in &data.recommendations {
        println!("  * {}", r);
    }
    println!("Alerts:");
    for label in dashboard.alert_labels() {
        println!("  * {}", label);
    }
    println!("Today's tasks:");
    for task in dashboard.today_tasks() {
        println!("  {}\t{}", task.title(), task.priority_label());
    }
    println!("Today's habits:");
    for habit in dashboard.habits() {
        println!("  {}\t{}/{}\t{:.0}%", habit.name, habit.done_today, habit.target_per_day, habit.progress_percent());
    }
    println!("Upcoming events:");
    for event in dashboard.upcoming_events() {
        let start = event.start_time.map(|t| t.in_timezone(&Local).format("%Y-%m-%d %H:%M").to_string());
        println!("  {}\t{}", start.unwrap_or_else(|| "?".to_string()), event.title);
    }
}

async fn show_agenda(ctx: SessionContext<Client>, month: YearMonth) {
    let agenda = AgendaSection::new(ctx);
    agenda.load().await;
    if agenda.view().is_loaded() == false {
        println!("Unable to load the events");
        return;
    }

    println!("Upcoming:");
    for event in agenda.upcoming() {
        println!("  {}\t{}\t{}", event.start_in(&Local).format("%Y-%m-%d %H:%M"), event.title(), event.id());
    }
    println!();
    agenda.with_grid(month, &Local, |grid| print_grid(grid));
}

async fn move_event(ctx: SessionContext<Client>, intent: RescheduleIntent) -> Result<(), BoxError> {
    let agenda = AgendaSection::new(ctx);
    agenda.load().await;
    match agenda.reschedule(&intent, &Local).await? {
        RescheduleOutcome::NoOp => println!("No event {} in the agenda", intent.event_id),
        RescheduleOutcome::Updated(update) => println!(
            "Moved to {} - {}",
            update.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            update.end_time.with_timezone(&Local).format("%H:%M"),
        ),
    }
    Ok(())
}
