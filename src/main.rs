//! Real-estate calculators CLI
//!
//! Command-line front end for coordinate conversion, mortgage, investment and
//! buy-vs-rent calculations. Peso amounts keep only their digits (`$100.000.000`),
//! coordinates and UF values use es-CL decimals (`346.000,5`), and rates accept
//! either decimal mark (`4,5` or `4.5`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use realestate_calc::assumptions::default_down_payment;
use realestate_calc::finance::{AmortizationResult, InvestmentPoint};
use realestate_calc::geodesy::{to_utm, write_tsv};
use realestate_calc::locale::{format_currency, format_decimal, format_thousands, parse_decimal, parse_rate, parse_whole_amount};
use realestate_calc::scenario::ScenarioResult;
use realestate_calc::{
    amortize, convert, convert_batch, evaluate, project, BuyRentInputs, BuyRentReport, GeoPoint,
    InvestmentParameters, LoanParameters, ScenarioRunner, UnitOfAccount, UtmPoint, UtmZone,
};

#[derive(Parser, Debug)]
#[command(name = "realestate-calc", version, about = "Real-estate calculators")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one UTM coordinate to latitude/longitude
    Convert {
        /// UTM zone (18 or 19, southern hemisphere)
        #[arg(long, default_value = "18", value_parser = parse_zone)]
        zone: UtmZone,
        #[arg(value_parser = parse_amount)]
        easting: f64,
        #[arg(value_parser = parse_amount)]
        northing: f64,
    },
    /// Convert `label easting northing` lines from a file or stdin
    Batch {
        #[arg(long, default_value = "18", value_parser = parse_zone)]
        zone: UtmZone,
        /// Input file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Print tab-separated output for spreadsheets
        #[arg(long)]
        tsv: bool,
    },
    /// Project a latitude/longitude into a UTM zone
    Forward {
        #[arg(long, default_value = "18", value_parser = parse_zone)]
        zone: UtmZone,
        #[arg(allow_hyphen_values = true, value_parser = parse_rate_arg)]
        latitude: f64,
        #[arg(allow_hyphen_values = true, value_parser = parse_rate_arg)]
        longitude: f64,
    },
    /// Monthly payment and total cost of a mortgage
    Mortgage {
        #[command(flatten)]
        loan: LoanArgs,
        /// Print the month-by-month amortization schedule as CSV
        #[arg(long)]
        schedule: bool,
    },
    /// Year-by-year growth of an investment
    Invest {
        #[arg(long, value_parser = parse_peso_amount)]
        initial: f64,
        #[arg(long, default_value = "0", value_parser = parse_peso_amount)]
        monthly: f64,
        /// Annual return in percent
        #[arg(long = "return", value_parser = parse_rate_arg)]
        annual_return: f64,
        #[arg(long, default_value_t = 25)]
        years: u32,
    },
    /// Compare buying against renting and investing the difference
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Compare under several annual returns and/or interest rates
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Annual returns to evaluate, in percent
        #[arg(long, num_args = 1.., value_parser = parse_rate_arg)]
        returns: Vec<f64>,
        /// Mortgage interest rates to evaluate, in percent
        #[arg(long, num_args = 1.., value_parser = parse_rate_arg)]
        rates: Vec<f64>,
    },
}

#[derive(Args, Debug)]
struct LoanArgs {
    /// Home price
    #[arg(long, value_parser = parse_peso_amount)]
    price: f64,
    /// Down payment (defaults to 20% of the price)
    #[arg(long, value_parser = parse_peso_amount)]
    down: Option<f64>,
    /// Annual interest rate in percent
    #[arg(long, value_parser = parse_rate_arg)]
    rate: f64,
    #[arg(long, default_value_t = 25)]
    years: u32,
    /// Denominate the loan in UF worth this many pesos today
    #[arg(long, value_parser = parse_amount)]
    unit_value: Option<f64>,
}

impl LoanArgs {
    fn parameters(&self) -> LoanParameters {
        LoanParameters {
            principal: self.price,
            down_payment: self.down.unwrap_or_else(|| default_down_payment(self.price)),
            annual_rate_percent: self.rate,
            term_years: self.years,
            unit_of_account: self.unit_of_account(),
        }
    }

    fn unit_of_account(&self) -> UnitOfAccount {
        match self.unit_value {
            Some(unit_value) => UnitOfAccount::Indexed { unit_value },
            None => UnitOfAccount::Primary,
        }
    }
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    #[command(flatten)]
    loan: LoanArgs,
    /// Monthly rent
    #[arg(long, value_parser = parse_peso_amount)]
    rent: f64,
    /// Annual investment return in percent
    #[arg(long = "return", value_parser = parse_rate_arg)]
    annual_return: f64,
    /// Initial investment (defaults to the down payment)
    #[arg(long, value_parser = parse_peso_amount)]
    initial: Option<f64>,
    /// Monthly investment (defaults to mortgage payment minus rent)
    #[arg(long, value_parser = parse_peso_amount)]
    monthly_investment: Option<f64>,
}

impl ScenarioArgs {
    fn inputs(&self) -> BuyRentInputs {
        BuyRentInputs {
            home_price: self.loan.price,
            down_payment: self.loan.down,
            annual_rate_percent: self.loan.rate,
            term_years: self.loan.years,
            unit_of_account: self.loan.unit_of_account(),
            monthly_rent: self.rent,
            annual_return_percent: self.annual_return,
            initial_investment: self.initial,
            monthly_investment: self.monthly_investment,
        }
    }
}

fn parse_zone(text: &str) -> Result<UtmZone, String> {
    let number: u8 = text
        .trim()
        .parse()
        .map_err(|_| format!("{:?} is not a zone number", text))?;
    UtmZone::try_from(number).map_err(|err| err.to_string())
}

fn parse_amount(text: &str) -> Result<f64, String> {
    parse_decimal(text).ok_or_else(|| format!("{:?} is not a number", text))
}

fn parse_peso_amount(text: &str) -> Result<f64, String> {
    parse_whole_amount(text).ok_or_else(|| format!("{:?} is not an amount", text))
}

fn parse_rate_arg(text: &str) -> Result<f64, String> {
    parse_rate(text).ok_or_else(|| format!("{:?} is not a rate", text))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Convert { zone, easting, northing } => {
            let geo = convert(&UtmPoint::new(easting, northing, zone));
            if cli.json {
                print_json(&geo)?;
            } else {
                println!("Latitud:  {}", format_decimal(geo.latitude, 6));
                println!("Longitud: {}", format_decimal(geo.longitude, 6));
            }
        }
        Command::Batch { zone, input, tsv } => {
            let text = match input {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Unable to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer).context("Unable to read stdin")?;
                    buffer
                }
            };

            let points = convert_batch(&text, zone)?;
            if cli.json {
                print_json(&points)?;
            } else if tsv {
                write_tsv(&points, io::stdout()).context("Unable to write TSV output")?;
            } else {
                println!("{:<12} {:>12} {:>12} {:>12} {:>12}", "Punto", "Latitud", "Longitud", "UTM E", "UTM N");
                println!("{}", "-".repeat(64));
                for point in &points {
                    println!(
                        "{:<12} {:>12} {:>12} {:>12} {:>12}",
                        point.label,
                        format_decimal(point.geo.latitude, 6),
                        format_decimal(point.geo.longitude, 6),
                        format_thousands(point.utm.easting),
                        format_thousands(point.utm.northing),
                    );
                }
                println!("\n{} coordinates converted (zone {})", points.len(), zone);
            }
        }
        Command::Forward { zone, latitude, longitude } => {
            let utm = to_utm(&GeoPoint { latitude, longitude }, zone);
            if cli.json {
                print_json(&utm)?;
            } else {
                println!("Zone:  {}", utm.zone);
                println!("UTM E: {}", format_decimal(utm.easting, 3));
                println!("UTM N: {}", format_decimal(utm.northing, 3));
            }
        }
        Command::Mortgage { loan, schedule } => {
            let result = amortize(&loan.parameters())?;

            if schedule {
                let mut writer = csv::Writer::from_writer(io::stdout());
                for row in result.schedule() {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            } else if cli.json {
                print_json(&result)?;
            } else {
                print_amortization(&result);
            }
        }
        Command::Invest { initial, monthly, annual_return, years } => {
            let points = project(&InvestmentParameters::new(initial, monthly, annual_return, years))?;
            if cli.json {
                print_json(&points)?;
            } else {
                print_investment(&points);
            }
        }
        Command::Compare { scenario } => {
            let report = evaluate(&scenario.inputs())?;
            if cli.json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
        Command::Sweep { scenario, returns, rates } => {
            if returns.is_empty() && rates.is_empty() {
                anyhow::bail!("Provide at least one value with --returns or --rates");
            }

            let runner = ScenarioRunner::new(scenario.inputs());
            let mut results = runner.run_returns(&returns)?;
            results.extend(runner.run_rates(&rates)?);

            if cli.json {
                print_json(&results)?;
            } else {
                print_sweep(&results);
            }
        }
    }

    Ok(())
}

fn print_amortization(result: &AmortizationResult) {
    println!("Monto del crédito:  {}", format_currency(result.loan_amount));
    println!("Pie:                {}", format_currency(result.down_payment));
    println!("Dividendo mensual:  {}", format_currency(result.monthly_payment));
    println!("Número de cuotas:   {}", result.total_payment_count);
    println!("Costo total:        {}", format_currency(result.total_cost));

    if let Some(indexed) = &result.indexed {
        println!();
        println!("Valor UF inicial:   {}", format_decimal(indexed.unit_value, 2));
        println!("Crédito en UF:      {}", format_decimal(indexed.loan_amount, 2));
        println!("Dividendo en UF:    {}", format_decimal(indexed.monthly_payment, 4));
        println!("Último dividendo:   {}", format_currency(result.last_payment()));
    }

    match result.effective_annual_cost() {
        Some(cae) => println!("CAE:                {}%", format_decimal(cae * 100.0, 2)),
        None => println!("CAE:                n/a"),
    }
}

fn print_investment(points: &[InvestmentPoint]) {
    println!("{:>5} {:>18} {:>18} {:>18}", "Año", "Aportes", "Valor total", "Ganancias");
    println!("{}", "-".repeat(62));
    for point in points {
        println!(
            "{:>5} {:>18} {:>18} {:>18}",
            point.year_index,
            format_currency(point.cumulative_contributions),
            format_currency(point.total_value),
            format_currency(point.gains),
        );
    }
}

fn print_report(report: &BuyRentReport) {
    println!("Comprar");
    print_amortization(&report.amortization);
    println!("Valor final propiedad: {}", format_currency(report.comparison.property_value));

    println!("\nArrendar e invertir");
    println!("Arriendo total:        {}", format_currency(report.total_rent));
    println!("Inversión inicial:     {}", format_currency(report.initial_investment));
    println!("Inversión mensual:     {}", format_currency(report.monthly_investment));
    if let Some(terminal) = report.terminal_investment() {
        println!("Total invertido:       {}", format_currency(terminal.cumulative_contributions));
        println!("Valor final inversión: {}", format_currency(terminal.total_value));
    }

    println!(
        "\nResultado: {} (diferencia {})",
        report.comparison.outcome,
        format_currency(report.comparison.margin())
    );
}

fn print_sweep(results: &[ScenarioResult]) {
    println!(
        "{:<14} {:>8} {:>18} {:>18} {:>18}",
        "Variable", "Valor %", "Propiedad", "Inversión", "Resultado"
    );
    println!("{}", "-".repeat(80));
    for result in results {
        println!(
            "{:<14} {:>8} {:>18} {:>18} {:>18}",
            format!("{:?}", result.variable),
            format_decimal(result.value, 2),
            format_currency(result.report.comparison.property_value),
            format_currency(result.report.comparison.investment_value),
            result.report.comparison.outcome.to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peso_amounts_keep_only_digits() {
        assert_eq!(parse_peso_amount("$100.000.000"), Ok(100_000_000.0));
        assert_eq!(parse_peso_amount("350000"), Ok(350_000.0));
        assert!(parse_peso_amount("none").is_err());
    }

    #[test]
    fn test_loan_arguments_parse_es_cl_input() {
        let cli = Cli::try_parse_from([
            "realestate-calc", "mortgage", "--price", "$100.000.000", "--rate", "4,5",
            "--unit-value", "37.000,5",
        ])
        .unwrap();

        match cli.command {
            Command::Mortgage { loan, .. } => {
                let params = loan.parameters();
                assert_eq!(params.principal, 100_000_000.0);
                assert_eq!(params.down_payment, 20_000_000.0);
                assert_eq!(params.annual_rate_percent, 4.5);
                assert_eq!(params.unit_of_account, UnitOfAccount::Indexed { unit_value: 37_000.5 });
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
