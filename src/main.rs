// 宝可梦个体值计算器命令行入口
// 加载配置与数据 -> 执行一条查询 -> 文本或JSON输出

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use pogoiv::{
    calculator::IvScanResult, CalculatorConfig, IvTriple, PokeInfoCalculator, Species, UpgradeCost,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pogoiv", version, about = "Pokemon GO IV calculator")]
struct Cli {
    /// 配置文件 (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 自定义种族数据集 (JSON/TOML)，覆盖配置文件
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// 以JSON输出
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 根据 CP/HP/等级 推断个体值
    Scan {
        species: String,
        #[arg(short, long)]
        level: f64,
        #[arg(long)]
        hp: u32,
        #[arg(long)]
        cp: u32,
    },
    /// 两个个体值组合在某等级下的CP区间
    Range {
        species: String,
        #[arg(long, default_value = "0/0/0")]
        low: IvTriple,
        #[arg(long, default_value = "15/15/15")]
        high: IvTriple,
        #[arg(short, long)]
        level: f64,
    },
    /// 进化链
    Line { species: String },
    /// 升级所需星尘与糖果
    Cost {
        #[arg(short, long)]
        level: f64,
        /// 目标等级，默认是训练师等级允许的上限
        #[arg(short, long)]
        goal: Option<f64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            pogoiv::init();
            eprintln!("{}", report_failure("配置加载失败", &e));
            std::process::exit(2);
        }
    };
    pogoiv::init_with_level(&config.general.log_level);

    if let Err(e) = run(&cli, &config) {
        eprintln!("{}", report_failure("查询失败", &e));
        std::process::exit(1);
    }
}

// 记录日志，返回写往 stderr 的文本
fn report_failure(stage: &str, e: &anyhow::Error) -> String {
    error!("{}: {:#}", stage, e);
    format!("error: {:#}", e)
}

fn load_config(cli: &Cli) -> Result<CalculatorConfig> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(data) = &cli.data {
        config.data.species_path = Some(data.clone());
    }
    Ok(config)
}

fn run(cli: &Cli, config: &CalculatorConfig) -> Result<()> {
    let calculator = PokeInfoCalculator::from_config(config).context("loading species data")?;
    info!("执行命令: {:?}", cli.command);

    match &cli.command {
        Command::Scan { species, level, hp, cp } => {
            let species = calculator.catalog().find(species)?;
            let result = calculator.iv_possibilities(species, *level, *hp, *cp)?;
            if cli.json {
                emit_json(&result)
            } else {
                println!("{}", render_scan(&result));
                Ok(())
            }
        }
        Command::Range { species, low, high, level } => {
            let species = calculator.catalog().find(species)?;
            let range = calculator.cp_range_at_level(species, *low, *high, *level)?;
            if cli.json {
                emit_json(&range)
            } else {
                println!("{} CP at lvl {}: {} - {}", species.name, range.level, range.min, range.max);
                Ok(())
            }
        }
        Command::Line { species } => {
            let species = calculator.catalog().find(species)?;
            let line = calculator.evolution_line(species);
            if cli.json {
                emit_json(&line)
            } else {
                println!("{}", render_line(&line));
                Ok(())
            }
        }
        Command::Cost { level, goal } => {
            let goal = goal.unwrap_or_else(|| config.trainer_level_cap());
            let cost = calculator.try_upgrade_cost(goal, *level)?;
            if cli.json {
                emit_json(&cost)
            } else {
                println!("{}", render_cost(*level, goal, cost));
                Ok(())
            }
        }
    }
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_scan(result: &IvScanResult) -> String {
    let header = format!("{} Lv.{}", result.species.name, result.estimated_level);
    if result.too_many_combinations {
        return format!("{}: too many possible combinations, power up once and scan again", header);
    }
    if result.combinations.is_empty() {
        return format!("{}: no IV combination matches, check the level estimate", header);
    }

    let mut lines = vec![format!("{}: {} possible combinations", header, result.combination_count())];
    for iv in &result.combinations {
        lines.push(format!("  {:>8}  {:>3}%", iv.to_string(), iv.percent()));
    }
    if let Some(average) = result.average_percent() {
        lines.push(format!("  average {}%", average));
    }
    lines.join("\n")
}

fn render_line(line: &[&Species]) -> String {
    line.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(" -> ")
}

fn render_cost(level: f64, goal: f64, cost: UpgradeCost) -> String {
    format!("Lv.{} -> Lv.{}: {} stardust, {} candy", level, goal, cost.stardust, cost.candy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["pogoiv", "scan", "Pidgey", "--level", "20", "--hp", "51", "--cp", "349"]).unwrap();
        match cli.command {
            Command::Scan { species, level, hp, cp } => {
                assert_eq!(species, "Pidgey");
                assert_eq!(level, 20.0);
                assert_eq!((hp, cp), (51, 349));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_range_defaults() {
        let cli = Cli::try_parse_from(["pogoiv", "--json", "range", "Mewtwo", "-l", "40"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Range { low, high, .. } => {
                assert_eq!(low, IvTriple::MIN);
                assert_eq!(high, IvTriple::MAX);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_iv() {
        assert!(Cli::try_parse_from(["pogoiv", "range", "Mewtwo", "-l", "40", "--low", "16/0/0"]).is_err());
    }

    #[test]
    fn test_run_queries_against_builtin() {
        let config = CalculatorConfig::default();
        for args in [
            vec!["pogoiv", "scan", "pidgey", "-l", "20", "--hp", "51", "--cp", "349"],
            vec!["pogoiv", "range", "Mewtwo", "-l", "40"],
            vec!["pogoiv", "line", "Vaporeon"],
            vec!["pogoiv", "cost", "-l", "20", "-g", "25"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            run(&cli, &config).unwrap();
        }
    }

    #[test]
    fn test_unreachable_cost_is_an_error() {
        let config = CalculatorConfig::default();
        let cli = Cli::try_parse_from(["pogoiv", "cost", "-l", "30", "-g", "25"]).unwrap();
        assert!(run(&cli, &config).is_err());

        let cli = Cli::try_parse_from(["pogoiv", "cost", "-l", "1", "-g", "1000000"]).unwrap();
        assert!(run(&cli, &config).is_err());
    }

    #[test]
    fn test_broken_config_is_reported() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("pogoiv.toml");
        std::fs::write(&path, "[trainer]\nlevel = 0\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["pogoiv", "--config", path_arg.as_str(), "line", "Eevee"]).unwrap();
        let error = load_config(&cli).unwrap_err();
        let message = report_failure("配置加载失败", &error);
        assert!(message.starts_with("error: loading config"));
        assert!(message.contains("trainer level must be within 1-40"));
    }

    #[test]
    fn test_render() {
        let calculator = PokeInfoCalculator::builtin();
        let pidgey = calculator.get_by_name("Pidgey").unwrap();
        let result = calculator.iv_possibilities(pidgey, 20.0, 56, 388).unwrap();
        let text = render_scan(&result);
        assert!(text.starts_with("Pidgey Lv.20: 1 possible combinations"));
        assert!(text.contains("15/15/15"));

        let ambiguous = calculator.iv_possibilities(pidgey, 1.0, 10, 10).unwrap();
        assert!(render_scan(&ambiguous).contains("too many"));

        let eevee = calculator.get_by_name("Eevee").unwrap();
        assert_eq!(render_line(&calculator.evolution_line(eevee)), "Eevee -> Flareon -> Jolteon -> Vaporeon");

        assert_eq!(render_cost(1.0, 2.0, UpgradeCost::new(1200, 2)), "Lv.1 -> Lv.2: 1200 stardust, 2 candy");
    }
}
