use super::session_menu::{
    concentrations_menu, plot_action, rates_action, settings_menu, show_session, upload_menu,
};
use crate::Protocol::mechanism_session::SessionController;
use crate::Protocol::plot_query::PlotKind;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    let mut controller = match SessionController::new() {
        Ok(controller) => controller,
        Err(e) => {
            alert(&format!("Failed to create service client: {}", e));
            return;
        }
    };
    let mut temperature = String::from("300");

    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => upload_menu(&mut controller),
            "2" => show_session(&controller),
            "3" => concentrations_menu(&mut controller, &mut temperature),
            "4" => rates_action(&controller, &temperature),
            "5" => plot_action(&mut controller, &temperature, PlotKind::ReactionRates),
            "6" => plot_action(&mut controller, &temperature, PlotKind::ProgressRates),
            "7" => {
                if settings_menu() {
                    // a new endpoint invalidates the old session anyway
                    match SessionController::new() {
                        Ok(fresh) => controller = fresh,
                        Err(e) => alert(&format!("Failed to create service client: {}", e)),
                    }
                }
            }
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n Wellcome to KinWeb: client for the web-based chemical kinetics calculator\n
    upload a reaction mechanism, query progress and reaction rates,\n
    plot them over a temperature range \n \x1b[0m"
    );
    println!("\x1b[33m1. Upload mechanism document\x1b[0m");
    println!("\x1b[33m2. Show active session\x1b[0m");
    println!("\x1b[33m3. Set concentrations and temperature\x1b[0m");
    println!("\x1b[33m4. Compute rates\x1b[0m");
    println!("\x1b[33m5. Plot reaction rates over T range\x1b[0m");
    println!("\x1b[33m6. Plot progress rates over T range\x1b[0m");
    println!("\x1b[33m7. Service settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

pub fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}

pub fn prompt(label: &str) -> String {
    print!("\x1b[36m{}\x1b[0m", label);
    io::stdout().flush().unwrap();
    get_user_input()
}

/// every failure, validation and server-side alike, ends up here as one red line
pub fn alert(msg: &str) {
    println!("\x1b[31m{}\x1b[0m", msg);
}
