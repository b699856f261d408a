//! Command dispatch.

use anyhow::{Result, anyhow};
use guesthouse_application::ports::Navigator;
use guesthouse_application::{AuthError, ClientContext};
use guesthouse_domain::RegisterForm;
use guesthouse_domain::resources::DashboardStats;
use guesthouse_domain::route::login_path;

use crate::cli::Command;

/// Runs one command against an already restored session.
pub async fn run(command: Command, context: &ClientContext, navigator: &dyn Navigator) -> Result<()> {
    match command {
        Command::Login {
            email,
            password,
            return_to,
        } => {
            navigator.navigate(&login_path(return_to.as_deref()));
            let session = context.auth.login(&email, &password).await.map_err(report)?;
            let decision = context.guard.resume_after_login().await;
            println!(
                "Logged in as {} ({}); {decision} at {}",
                session.identity.display_name(),
                session.role(),
                navigator.current_path()
            );
        }
        Command::Register {
            username,
            email,
            password,
            first_name,
            last_name,
            phone,
        } => {
            navigator.navigate("/register");
            let form = RegisterForm {
                username,
                email,
                password,
                first_name,
                last_name,
                phone_number: phone,
            };
            let session = context.auth.register(&form).await.map_err(report)?;
            context.guard.resume_after_login().await;
            println!("Welcome, {}", session.identity.display_name());
        }
        Command::Logout => {
            context.auth.logout().await;
            println!("Logged out");
        }
        Command::Whoami => {
            match context.session.get_session().await.session() {
                Some(session) => println!(
                    "{} <{}> role {}",
                    session.identity.display_name(),
                    session.identity.email,
                    session.role()
                ),
                None => println!("Nobody is logged in"),
            }
            println!("{}", context.session.token_status().await.display_message());
        }
        Command::Open { path } => {
            let decision = context.guard.navigate(&path).await;
            println!("{decision}; now at {}", navigator.current_path());
        }
        Command::ForgotPassword { email } => {
            context.auth.forgot_password(&email).await.map_err(report)?;
            println!("If an account exists for {email}, a reset link has been sent");
        }
        Command::ResetPassword {
            token,
            new_password,
        } => {
            context
                .auth
                .reset_password(&token, &new_password)
                .await
                .map_err(report)?;
            println!("Password updated; log in with the new password");
        }
        Command::GuestHouses { available } => {
            enter(context, navigator, "/guesthouses").await?;
            let guest_houses = if available {
                context.guest_houses().with_available_beds().await?
            } else {
                context.guest_houses().list().await?
            };
            for house in guest_houses {
                println!(
                    "{:>4}  {}, {} ({} free beds)",
                    house.id.unwrap_or_default(),
                    house.name,
                    house.city,
                    house.available_beds.unwrap_or_default()
                );
            }
        }
        Command::MyBookings { status } => {
            enter(context, navigator, "/my-bookings").await?;
            let state = context.session.get_session().await;
            let session = state
                .session()
                .ok_or_else(|| anyhow!("session ended unexpectedly"))?;
            let bookings = context
                .bookings()
                .by_user(session.identity.id, status.map(Into::into))
                .await?;
            for booking in bookings {
                println!(
                    "{:>5}  {} -> {}  {:<9}  {:.2}  {}",
                    booking.id,
                    booking.check_in_date,
                    booking.check_out_date,
                    booking.status,
                    booking.total_price,
                    booking.guest_house_name.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Stats { from, to } => {
            enter(context, navigator, "/admin").await?;
            let stats = match (from, to) {
                (Some(from), Some(to)) => context.dashboard().period_report(from, to).await?,
                _ => context.dashboard().stats().await?,
            };
            print_stats(&stats);
        }
    }
    Ok(())
}

/// Navigates to a view and fails unless the guard lets it render.
async fn enter(context: &ClientContext, navigator: &dyn Navigator, path: &str) -> Result<()> {
    let decision = context.guard.navigate(path).await;
    if decision.renders() {
        Ok(())
    } else {
        Err(anyhow!(
            "cannot open {path}: {decision} (now at {})",
            navigator.current_path()
        ))
    }
}

fn report(error: AuthError) -> anyhow::Error {
    anyhow!(error.user_message())
}

fn print_stats(stats: &DashboardStats) {
    let rows = [
        ("Users", stats.total_users),
        ("Guest houses", stats.total_guest_houses),
        ("Rooms", stats.total_rooms),
        ("Beds", stats.total_beds),
        ("Available beds", stats.available_beds),
        ("Bookings", stats.total_bookings),
        ("Pending", stats.pending_bookings),
        ("Confirmed", stats.confirmed_bookings),
        ("Period bookings", stats.period_bookings),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            println!("{label:<16} {value}");
        }
    }
    if let Some(revenue) = stats.total_revenue.or(stats.period_revenue) {
        println!("{:<16} {revenue:.2}", "Revenue");
    }
}
