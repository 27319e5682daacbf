use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    job_monitor::apps::run_job_monitor(std::env::args().skip(1))
}
