use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for rpayclock
/// Attendance anomalies and teaching payroll on top of SQLite
#[derive(Parser)]
#[command(
    name = "rpayclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance sessions, anomaly detection and payroll hour forecasting using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user (overrides `user` in the config)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Act with this role; repeatable (overrides `roles` in the config)
    #[arg(global = true, long = "role", action = ArgAction::Append)]
    pub roles: Vec<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", help = "Only the last N rows")]
        last: Option<usize>,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Record or list punches (check-ins)
    Punch {
        #[command(subcommand)]
        action: PunchCmd,
    },

    /// Manage holiday lists
    Holiday {
        #[command(subcommand)]
        action: HolidayCmd,
    },

    /// Record leave applications
    Leave {
        #[command(subcommand)]
        action: LeaveCmd,
    },

    /// Mark or list processed attendance
    Attendance {
        #[command(subcommand)]
        action: AttendanceCmd,
    },

    /// Course calendars and teaching assignments
    Course {
        #[command(subcommand)]
        action: CourseCmd,
    },

    /// Detect attendance anomalies in a date range
    Anomalies {
        #[arg(long, help = "First day (YYYY-MM-DD)")]
        from: String,

        #[arg(long, help = "Last day, included (YYYY-MM-DD)")]
        to: String,

        #[arg(long, short = 'e', help = "Only this employee")]
        employee: Option<String>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,

        /// Reference "today" (YYYY-MM-DD)
        #[arg(long, hide = true)]
        today: Option<String>,
    },

    /// Day-by-day attendance report of one employee
    Report {
        #[arg(long, short = 'e')]
        employee: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Record HR-verified hours for an employee-day
    Verify {
        #[arg(long, short = 'e')]
        employee: String,

        #[arg(long, help = "Day (YYYY-MM-DD)")]
        date: String,

        #[arg(long, help = "Verified total hours")]
        hours: f64,

        #[arg(long = "in", help = "Verified in time (HH:MM)")]
        in_time: Option<String>,

        #[arg(long = "out", help = "Verified out time (HH:MM)")]
        out_time: Option<String>,

        #[arg(long, help = "Rest time, free text (e.g. 00:30)")]
        rest: Option<String>,
    },

    /// Forecast teaching hours and payroll of a month
    Forecast {
        #[arg(long, short = 'm', help = "Month: 1-12, English or Spanish name")]
        month: String,

        #[arg(long, short = 'y')]
        year: i32,

        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, short = 'c')]
        course: Option<String>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Realized payroll records
    Payroll {
        #[command(subcommand)]
        action: PayrollCmd,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Create an employee
    Add {
        id: String,
        name: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long = "holiday-list")]
        holiday_list: Option<String>,

        #[arg(long = "user-id", help = "Login the employee uses (for self-service access)")]
        user_id: Option<String>,

        #[arg(long, help = "Job offer status: pending, accepted, rejected")]
        offer: Option<String>,

        #[arg(long, help = "Employment status: active, inactive, left")]
        status: Option<String>,

        #[arg(long, help = "Date of joining (YYYY-MM-DD)")]
        joined: Option<String>,
    },

    /// List employees
    List {
        #[arg(long, help = "Include inactive and former employees")]
        all: bool,
    },

    /// Change the offer or employment status of an employee
    Offer {
        id: String,

        #[arg(help = "Offer status: pending, accepted, rejected")]
        offer: Option<String>,

        #[arg(long, help = "Employment status: active, inactive, left")]
        status: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PunchCmd {
    /// Record a punch
    Add {
        employee: String,

        #[arg(long, help = "Day (YYYY-MM-DD)")]
        date: String,

        #[arg(long, help = "Time (HH:MM or HH:MM:SS)")]
        time: String,

        #[arg(long, help = "in | out")]
        kind: String,

        #[arg(long, help = "Time clock identifier")]
        device: Option<String>,
    },

    /// List the punches of an employee
    List {
        employee: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum HolidayCmd {
    /// Add a holiday to a list
    Add {
        list: String,
        date: String,

        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum LeaveCmd {
    /// Record a leave application
    Add {
        employee: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long = "type", help = "Leave type, e.g. \"Sick Leave\"")]
        leave_type: String,

        #[arg(long, default_value = "approved", help = "open, approved, rejected, cancelled")]
        status: String,

        #[arg(long = "half-day")]
        half_day: bool,

        #[arg(long = "half-day-date", requires = "half_day")]
        half_day_date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AttendanceCmd {
    /// Mark attendance for an employee-day
    Mark {
        employee: String,

        #[arg(long, help = "present, absent, half-day, wfh, on-leave")]
        status: String,

        #[arg(long, help = "Day (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "in")]
        in_time: Option<String>,

        #[arg(long = "out")]
        out_time: Option<String>,

        #[arg(long = "late", help = "Flag a late entry")]
        late: bool,

        #[arg(long = "early", help = "Flag an early exit")]
        early: bool,
    },

    /// List attendance of an employee
    List {
        employee: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum CourseCmd {
    /// Add a calendar day to a course
    Slot {
        course: String,

        #[arg(long)]
        date: String,

        #[arg(
            long = "range",
            action = ArgAction::Append,
            help = "Teaching range HH:MM-HH:MM (up to 6)"
        )]
        ranges: Vec<String>,

        #[arg(long = "non-teaching", help = "The day is not a teaching day")]
        non_teaching: bool,
    },

    /// Assign a teacher to a course at an hourly rate
    Assign {
        employee: String,
        course: String,

        #[arg(long)]
        rate: String,

        #[arg(long, default_value = "offer", help = "offer | modification")]
        source: String,

        #[arg(long = "doc", default_value = "", help = "Source document reference")]
        doc: String,
    },
}

#[derive(Subcommand)]
pub enum PayrollCmd {
    /// Turn the forecast of a month into payroll records
    Finalize {
        #[arg(long, short = 'm')]
        month: String,

        #[arg(long, short = 'y')]
        year: i32,

        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, short = 'c')]
        course: Option<String>,

        #[arg(long, help = "Create new records as drafts (editable extra hours)")]
        draft: bool,

        #[arg(long = "last-month", help = "Mark as the last month of the contract")]
        last_month: bool,

        /// Settlement date (YYYY-MM-DD)
        #[arg(long, hide = true)]
        today: Option<String>,
    },

    /// List payroll records with totals
    List {
        #[arg(long, short = 'm')]
        month: Option<String>,

        #[arg(long, short = 'y')]
        year: Option<i32>,

        #[arg(long, short = 'e')]
        employee: Option<String>,

        #[arg(long, short = 'c')]
        course: Option<String>,

        #[arg(long, help = "settled, sent, paid")]
        state: Option<String>,

        #[arg(long, help = "Include cancelled records")]
        all: bool,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Set extra hours on a draft record
    Extra {
        id: i64,

        #[arg(long)]
        hours: String,

        #[arg(long, help = "Extra hour rate (default: the record's)")]
        rate: Option<String>,
    },

    /// Submit draft records
    Submit {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Mark submitted records as sent to the advisor
    Sent {
        #[arg(required = true)]
        ids: Vec<i64>,

        #[arg(long, help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// Mark submitted records as paid
    Paid {
        #[arg(required = true)]
        ids: Vec<i64>,

        #[arg(long, help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// Cancel records (frees their month for a new forecast)
    Cancel {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}
