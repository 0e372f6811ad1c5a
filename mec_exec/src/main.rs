//! Main mecanum drive executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Mode callback of the robot:
//!             - Sensor acquisition through odometry
//!             - Autonomy or teleop processing
//!             - Drive control processing
//!         - Plant simulation
//!         - Archive writing
//!
//! # Modules
//!
//! All cyclic modules (e.g. `drive_ctrl`) shall provide a public struct implementing the
//! `util::module::State` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use eqpt_if::tc::RobotMode;
use log::{debug, info, warn};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use mec_lib::{
    drive_ctrl::DriveCtrl,
    params::MecExecParams,
    robot::{Robot, RobotParams, SafeModeCause},
    sim::{SimParams, SimPlant},
    tlm::Dashboard,
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Mecanum field-oriented drive executable.
#[derive(Debug, StructOpt)]
#[structopt(name = "mec_exec")]
struct Opts {
    /// Robot mode to run in: disabled, auto or teleop.
    #[structopt(short, long, default_value = "auto")]
    mode: RobotMode,

    /// Stop after this many cycles.
    #[structopt(long)]
    max_cycles: Option<u64>,

    /// Pace the cycles in real time rather than running as fast as possible.
    #[structopt(long)]
    realtime: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("mec_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Mecanum Drive Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let exec_params: MecExecParams =
        util::params::load("exec.toml").wrap_err("Could not load exec params")?;

    let sim_params: SimParams =
        util::params::load("sim.toml").wrap_err("Could not load sim params")?;

    let robot_params = RobotParams {
        odom: util::params::load("odom.toml").wrap_err("Could not load odom params")?,
        teleop: util::params::load("teleop.toml").wrap_err("Could not load teleop params")?,
        auto_mgr: util::params::load("auto_mgr.toml")
            .wrap_err("Could not load auto_mgr params")?,
    };

    info!("Exec parameters loaded");

    let cycle_period_s = exec_params.cycle_period_s;
    let cycle_frequency_hz = 1.0 / cycle_period_s;

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut drive_ctrl = DriveCtrl::default();
    drive_ctrl
        .init("drive_ctrl.toml", &session)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("DriveCtrl init complete");

    let mut plant = SimPlant::new(sim_params);
    info!("Sim plant init complete");

    let mut robot = Robot::new(
        plant.hardware(),
        drive_ctrl,
        robot_params,
        Box::new(Dashboard::new(exec_params.tlm_save_every_cycles)),
    );
    robot.robot_init();

    if opts.mode == RobotMode::Auto {
        robot
            .autonomous_init()
            .wrap_err("Failed to initialise autonomous")?;
    }

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop in {:?} mode\n", opts.mode);

    let mut num_consec_cycle_overruns = 0u64;

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        robot.cycle_start(cycle_frequency_hz);

        // Settle delays are timed in wall clock time only when running in real time
        let time_s = if opts.realtime {
            session::get_elapsed_seconds()
        } else {
            robot.num_cycles as f64 * cycle_period_s
        };

        // ---- MODE PROCESSING ----

        match opts.mode {
            RobotMode::Disabled => robot.disabled_periodic(),
            RobotMode::Auto => {
                if let Err(e) = robot.autonomous_periodic(time_s) {
                    warn!("Autonomous stopped: {}", e);
                }
            }
            RobotMode::Teleop => robot.teleop_periodic(),
        }

        // ---- PLANT SIMULATION ----

        plant.step(cycle_period_s);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = robot.write_archives() {
            warn!("Could not write archives: {}", e);
        }

        if robot.is_1_hz_cycle {
            let pose = robot.pose();
            info!(
                "Cycle {}: heading {:.2} deg, field heading {:.2} deg, FL {:.2} in",
                robot.num_cycles, pose.heading_deg, pose.field_heading_deg, pose.wheel_dist_in[0]
            );
        }

        robot.cycle_end();

        // ---- EXIT CONDITIONS ----

        if opts.mode == RobotMode::Auto {
            if let Some(outcome) = robot.auto_outcome() {
                info!("Autonomous finished: {:?}", outcome);
                break;
            }
        }

        if let Some(max) = opts.max_cycles {
            if robot.num_cycles >= max {
                info!("Maximum number of cycles ({}) reached", max);
                break;
            }
        }

        // ---- CYCLE MANAGEMENT ----

        if !opts.realtime {
            continue;
        }

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(cycle_period_s).checked_sub(cycle_dur) {
            Some(d) => {
                num_consec_cycle_overruns = 0;
                robot.make_unsafe(SafeModeCause::CycleOverrun).ok();
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period_s
                );
                num_consec_cycle_overruns += 1;

                if num_consec_cycle_overruns > exec_params.max_consec_overruns {
                    robot.make_safe(SafeModeCause::CycleOverrun);
                }
            }
        }
    }

    // ---- SHUTDOWN ----

    if let Some(outcome) = robot.auto_outcome() {
        session.save("auto_outcome.json", outcome);
    }
    session.save("sim_state.json", plant.sim_state());

    info!("End of execution");

    session.exit();

    Ok(())
}
