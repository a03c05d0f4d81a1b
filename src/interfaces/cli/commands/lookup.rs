//! Lookup command

use std::net::IpAddr;

use colored::Colorize;

use crate::errors::{MastobanError, Result};
use crate::services::{GeoIpLookup, MaxMindLocator};

/// 查询 IP 所在的大洲与国家
pub fn lookup_ip(ip: &str, dbfile: Option<&str>, home_country: &str) -> Result<()> {
    let addr: IpAddr = ip
        .trim()
        .parse()
        .map_err(|_| MastobanError::invalid_ip(format!("'{}' is not an IP address", ip)))?;

    let locator = MaxMindLocator::open(dbfile)?;
    let record = locator.lookup(addr)?;

    println!("{} {}", "IP:".bold(), record.ip.to_string().cyan());
    println!("  {} {}", "Continent:".bold(), record.continent.blue());
    println!("  {} {}", "Country:".bold(), record.country.blue());

    if record.country.eq_ignore_ascii_case(home_country) {
        println!("  {}", "Home country, no action".green());
    } else {
        println!(
            "  {} {}",
            "Not from".yellow(),
            home_country.to_ascii_uppercase().yellow()
        );
    }
    Ok(())
}
