//! Runtime configuration parsed from flags and environment.

use clap::Parser;

use backend::domain::user_onboarding::DefaultPasswords;

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "University records REST backend")]
pub struct AppConfig {
    /// Address to bind the listener to.
    #[arg(long, env = "IP", default_value = "127.0.0.1")]
    pub ip: String,

    /// Port to bind the listener to.
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Fallback password for onboarded students.
    #[arg(long, env = "DEFAULT_STUDENT_PASS", hide_env_values = true)]
    pub default_student_pass: String,

    /// Fallback password for onboarded faculty.
    #[arg(long, env = "DEFAULT_FACULTY_PASS", hide_env_values = true)]
    pub default_faculty_pass: String,

    /// Fallback password for admin provisioning. Collected alongside the
    /// other role passwords even though no admin onboarding endpoint exists
    /// yet, so deployments configure all three up front.
    #[arg(long, env = "DEFAULT_ADMIN_PASS", hide_env_values = true)]
    pub default_admin_pass: String,
}

impl AppConfig {
    /// Bundle the role passwords for the onboarding coordinator.
    #[must_use]
    pub fn default_passwords(&self) -> DefaultPasswords {
        DefaultPasswords {
            student: self.default_student_pass.clone(),
            faculty: self.default_faculty_pass.clone(),
            admin: self.default_admin_pass.clone(),
        }
    }
}
