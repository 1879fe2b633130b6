// UI layer: provides a simple interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::{EditRequest, Interface, RestconfClient};
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One menu entry. Parsed from the operator's numeric input; anything
/// outside 1-6 is rejected and re-prompted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowConfig,
    ShowInterfaces,
    EditInterface,
    ChangeHostname,
    ChangeIpDomain,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ShowConfig),
            "2" => Some(MenuChoice::ShowInterfaces),
            "3" => Some(MenuChoice::EditInterface),
            "4" => Some(MenuChoice::ChangeHostname),
            "5" => Some(MenuChoice::ChangeIpDomain),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Main interactive menu. Receives a `RestconfClient` and runs a numbered
/// prompt loop until the operator chooses Exit. Every device failure is
/// printed by its handler; the loop itself only stops on terminal errors.
pub fn main_menu(api: RestconfClient) -> Result<()> {
    loop {
        println!("\n--- Menu ---");
        println!("1. Show device configuration");
        println!("2. Show interfaces");
        println!("3. Edit an interface");
        println!("4. Change hostname");
        println!("5. Change ip domain");
        println!("6. Exit");
        let choice: String = Input::new().with_prompt("Select an option").interact_text()?;

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::ShowConfig) => show_config(&api),
            Some(MenuChoice::ShowInterfaces) => show_interfaces(&api),
            Some(MenuChoice::EditInterface) => edit_interface(&api)?,
            Some(MenuChoice::ChangeHostname) => change_hostname(&api)?,
            Some(MenuChoice::ChangeIpDomain) => change_ip_domain(&api)?,
            Some(MenuChoice::Exit) => break,
            None => println!("Invalid option. Please try again."),
        }
    }
    Ok(())
}

/// Fetch the full native configuration and print it verbatim.
fn show_config(api: &RestconfClient) {
    let pb = spinner("Retrieving configuration...");
    let result = api.get_native_config();
    pb.finish_and_clear();
    match result {
        Ok(config) => println!("{}", config),
        Err(e) => println!("{:#}", e),
    }
}

/// Fetch the interfaces collection and pretty-print the whole JSON body.
fn show_interfaces(api: &RestconfClient) {
    let pb = spinner("Retrieving interfaces...");
    let result = api.get_interfaces_json();
    pb.finish_and_clear();
    match result {
        Ok(interfaces) => match serde_json::to_string_pretty(&interfaces) {
            Ok(text) => println!("{}", text),
            Err(e) => println!("Failed to render interfaces: {}", e),
        },
        Err(e) => println!("{:#}", e),
    }
}

/// Show the current interfaces as a table, collect the edit fields and
/// PUT the replacement interface object.
fn edit_interface(api: &RestconfClient) -> Result<()> {
    let pb = spinner("Retrieving interfaces...");
    let result = api.get_interfaces();
    pb.finish_and_clear();
    let interfaces = match result {
        Ok(interfaces) => interfaces,
        Err(e) => {
            println!("{:#}", e);
            return Ok(());
        }
    };

    let rows = interface_rows(&interfaces);
    println!("\nAvailable Interfaces\n");
    println!("{}", format_interface_table(&rows));

    let interface_name: String = Input::new()
        .with_prompt("Enter the name of the interface (e.g., GigabitEthernet1)")
        .interact_text()?;
    let description: String = Input::new()
        .with_prompt("Enter the new description of the interface")
        .allow_empty(true)
        .interact_text()?;
    let ip_address: String = Input::new()
        .with_prompt("Enter the new IP address (e.g., 192.0.2.1)")
        .interact_text()?;
    let netmask: String = Input::new()
        .with_prompt("Enter the new netmask (e.g., 255.255.255.0)")
        .interact_text()?;

    let edit = EditRequest {
        interface_name,
        description,
        ip_address,
        netmask,
    };

    let pb = spinner("Updating interface...");
    let result = api.put_interface(&edit);
    pb.finish_and_clear();
    match result {
        Ok(()) => println!("The interface has been successfully edited."),
        Err(e) => println!("{:#}", e),
    }
    Ok(())
}

/// Prompt for a hostname and PUT it to the device.
fn change_hostname(api: &RestconfClient) -> Result<()> {
    let hostname: String = Input::new()
        .with_prompt("Enter the new hostname")
        .interact_text()?;

    let pb = spinner("Updating hostname...");
    let result = api.set_hostname(&hostname);
    pb.finish_and_clear();
    match result {
        Ok(()) => println!("Hostname changed successfully."),
        Err(e) => println!("{:#}", e),
    }
    Ok(())
}

/// Prompt for an IP domain and PUT it to the device.
fn change_ip_domain(api: &RestconfClient) -> Result<()> {
    let domain: String = Input::new()
        .with_prompt("Enter the new IP domain")
        .interact_text()?;

    let pb = spinner("Updating IP domain...");
    let result = api.set_ip_domain(&domain);
    pb.finish_and_clear();
    match result {
        Ok(()) => println!("IP domain changed successfully."),
        Err(e) => println!("{:#}", e),
    }
    Ok(())
}

/// Spinner shown while a blocking request is in flight.
fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(msg.to_string());
    pb
}

/// One display row of the interface table. Missing device fields render
/// as empty cells rather than failing the whole edit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InterfaceRow {
    name: String,
    description: String,
    if_type: String,
    enabled: bool,
    ipv4_address: String,
    ipv4_netmask: String,
}

impl InterfaceRow {
    fn cells(&self) -> [String; 6] {
        [
            self.name.clone(),
            self.description.clone(),
            self.if_type.clone(),
            self.enabled.to_string(),
            self.ipv4_address.clone(),
            self.ipv4_netmask.clone(),
        ]
    }
}

/// Flatten fetched interfaces into table rows, taking the first IPv4
/// address of each entry.
fn interface_rows(interfaces: &[Interface]) -> Vec<InterfaceRow> {
    interfaces
        .iter()
        .map(|interface| {
            let first_addr = interface
                .ipv4
                .as_ref()
                .and_then(|ipv4| ipv4.address.first());
            InterfaceRow {
                name: interface.name.clone(),
                description: interface.description.clone().unwrap_or_default(),
                if_type: interface.if_type.clone(),
                enabled: interface.enabled,
                ipv4_address: first_addr.map(|a| a.ip.clone()).unwrap_or_default(),
                ipv4_netmask: first_addr
                    .and_then(|a| a.netmask.clone())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

const TABLE_HEADERS: [&str; 6] = [
    "Name",
    "Description",
    "Type",
    "Enabled",
    "IPv4 Address",
    "IPv4 Netmask",
];

/// Render rows as a plain fixed-width table, columns sized to content.
fn format_interface_table(rows: &[InterfaceRow]) -> String {
    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.cells().iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    for (i, header) in TABLE_HEADERS.iter().enumerate() {
        out.push_str(&format!("{:<width$}  ", header, width = widths[i]));
    }
    out.push('\n');
    for width in &widths {
        out.push_str(&format!("{}  ", "-".repeat(*width)));
    }
    for row in rows {
        out.push('\n');
        for (i, cell) in row.cells().iter().enumerate() {
            out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Ipv4, Ipv4Address};

    fn sample_interfaces() -> Vec<Interface> {
        vec![
            Interface {
                name: "GigabitEthernet1".into(),
                description: Some("MANAGEMENT".into()),
                if_type: "iana-if-type:ethernetCsmacd".into(),
                enabled: true,
                ipv4: Some(Ipv4 {
                    address: vec![Ipv4Address {
                        ip: "10.10.20.48".into(),
                        netmask: Some("255.255.255.0".into()),
                    }],
                }),
            },
            Interface {
                name: "Loopback0".into(),
                description: None,
                if_type: "iana-if-type:softwareLoopback".into(),
                enabled: false,
                ipv4: None,
            },
        ]
    }

    #[test]
    fn parses_all_valid_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::ShowConfig));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::ShowInterfaces));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::EditInterface));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::ChangeHostname));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::ChangeIpDomain));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
    }

    #[test]
    fn rejects_anything_outside_the_menu() {
        for input in ["0", "7", "42", "x", "", "exit", "1.5"] {
            assert_eq!(MenuChoice::parse(input), None, "input {:?}", input);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(MenuChoice::parse(" 3 \n"), Some(MenuChoice::EditInterface));
    }

    #[test]
    fn one_row_per_interface_entry() {
        let rows = interface_rows(&sample_interfaces());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "GigabitEthernet1");
        assert_eq!(rows[0].ipv4_address, "10.10.20.48");
        assert_eq!(rows[0].ipv4_netmask, "255.255.255.0");
    }

    #[test]
    fn missing_fields_become_empty_cells() {
        let rows = interface_rows(&sample_interfaces());
        assert_eq!(rows[1].description, "");
        assert_eq!(rows[1].ipv4_address, "");
        assert_eq!(rows[1].ipv4_netmask, "");
        assert!(!rows[1].enabled);
    }

    #[test]
    fn netmask_defaults_to_empty_when_address_has_none() {
        let interfaces = vec![Interface {
            name: "GigabitEthernet2".into(),
            description: None,
            if_type: "iana-if-type:ethernetCsmacd".into(),
            enabled: true,
            ipv4: Some(Ipv4 {
                address: vec![Ipv4Address {
                    ip: "192.0.2.9".into(),
                    netmask: None,
                }],
            }),
        }];
        let rows = interface_rows(&interfaces);
        assert_eq!(rows[0].ipv4_address, "192.0.2.9");
        assert_eq!(rows[0].ipv4_netmask, "");
    }

    #[test]
    fn table_has_header_separator_and_one_line_per_row() {
        let rows = interface_rows(&sample_interfaces());
        let table = format_interface_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 + rows.len());
        assert!(lines[0].contains("Name"));
        assert!(lines[0].contains("IPv4 Netmask"));
        assert!(lines[2].contains("GigabitEthernet1"));
        assert!(lines[3].contains("Loopback0"));
    }

    #[test]
    fn empty_interface_list_renders_headers_only() {
        let table = format_interface_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
