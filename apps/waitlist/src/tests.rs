//! Command-line parsing tests for the `waitlist` binary.

#[cfg(test)]
mod run_args {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::{Cli, Command, MonthlyRows, RunArgs};

    fn parse(args: &[&str]) -> RunArgs {
        let argv = ["waitlist", "run"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Run(run) => run,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let args = parse(&["7", "5", "out.csv"]);
        assert_eq!(args.seed, 7);
        assert_eq!(args.monthly_rows().unwrap(), MonthlyRows::Off);
        let config = args.config();
        assert!((config.advantage_probability - 0.05).abs() < 1e-12);
        assert!(config.smart_listing);
        assert_eq!(config.average_lifespan, 91.0);
    }

    #[test]
    fn csv_run_writes_monthly_rows_to_given_path() {
        let args = parse(&["0", "5", "out.csv", "--tick-summaries", "ticks.csv"]);
        assert_eq!(args.monthly_rows().unwrap(), MonthlyRows::Csv(PathBuf::from("ticks.csv")));
    }

    #[test]
    fn csv_run_needs_a_monthly_path() {
        let args = parse(&["0", "5", "out.csv", "--tick-summaries"]);
        assert!(args.monthly_rows().is_err());
    }

    #[test]
    fn db_run_keeps_monthly_rows_in_the_database() {
        let args = parse(&["0", "5", "out.db", "--tick-summaries"]);
        assert!(args.is_db());
        assert_eq!(args.monthly_rows().unwrap(), MonthlyRows::Database);
    }

    #[test]
    fn db_run_rejects_a_monthly_csv_path() {
        let args = parse(&["0", "5", "out.db", "--tick-summaries", "ticks.csv"]);
        let err = args.monthly_rows().unwrap_err().to_string();
        assert!(err.contains("ticks.csv"), "{err}");
    }
}
