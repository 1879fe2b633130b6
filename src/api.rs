// RESTCONF client module: contains a small blocking HTTP client that talks
// to a single Cisco IOS-XE device. It is intentionally small and
// synchronous; every device operation is one request/response exchange.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Media type RESTCONF expects for YANG-modeled JSON payloads.
const YANG_JSON: &str = "application/yang-data+json";

/// IANA interface type written back on every interface edit.
pub const ETHERNET_CSMACD: &str = "iana-if-type:ethernetCsmacd";

/// Connection settings for the target device. Built once at startup and
/// handed to `RestconfClient::new`; nothing mutates it afterwards.
#[derive(Clone, Debug)]
pub struct DeviceConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// IOS-XE sandboxes ship self-signed certificates, so verification is
    /// off unless `IOSXE_VERIFY_TLS` asks for it.
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl DeviceConfig {
    /// Read the device endpoint from environment variables. `IOSXE_HOST`
    /// and `IOSXE_USERNAME` are required; a missing `IOSXE_PASSWORD` is
    /// left empty so the caller can prompt for it interactively.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("IOSXE_HOST")
            .context("IOSXE_HOST is not set (device hostname or IP)")?;
        let username =
            std::env::var("IOSXE_USERNAME").context("IOSXE_USERNAME is not set")?;
        let password = std::env::var("IOSXE_PASSWORD").unwrap_or_default();
        let verify_tls = std::env::var("IOSXE_VERIFY_TLS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let timeout = std::env::var("IOSXE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));
        Ok(DeviceConfig {
            host,
            username,
            password,
            verify_tls,
            timeout,
        })
    }

    /// Root of the RESTCONF datastore on the device.
    pub fn base_url(&self) -> String {
        format!("https://{}/restconf/data", self.host)
    }
}

/// Blocking RESTCONF client holding a reqwest client, the datastore base
/// URL and the credentials used for Basic auth on every request.
#[derive(Clone)]
pub struct RestconfClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

/// One entry of the `ietf-interfaces:interfaces` collection. Optional
/// fields mirror what the device may omit (loopbacks have no description,
/// unnumbered interfaces carry no `ietf-ip:ipv4` block).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Interface {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub if_type: String,
    pub enabled: bool,
    #[serde(rename = "ietf-ip:ipv4", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Ipv4 {
    #[serde(default)]
    pub address: Vec<Ipv4Address>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Ipv4Address {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
}

/// Top-level shape of the interfaces GET response.
#[derive(Deserialize, Debug)]
struct InterfacesReply {
    #[serde(rename = "ietf-interfaces:interfaces")]
    interfaces: InterfaceList,
}

#[derive(Deserialize, Debug)]
struct InterfaceList {
    #[serde(default)]
    interface: Vec<Interface>,
}

/// Operator input for an interface edit, captured verbatim from prompts.
/// `payload()` turns it into the PUT body; the interface type and enabled
/// flag are fixed there and not operator-configurable.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub interface_name: String,
    pub description: String,
    pub ip_address: String,
    pub netmask: String,
}

#[derive(Serialize, Debug)]
struct InterfacePayload {
    #[serde(rename = "ietf-interfaces:interface")]
    interface: Interface,
}

impl EditRequest {
    fn payload(&self) -> InterfacePayload {
        InterfacePayload {
            interface: Interface {
                name: self.interface_name.clone(),
                description: Some(self.description.clone()),
                if_type: ETHERNET_CSMACD.to_string(),
                enabled: true,
                ipv4: Some(Ipv4 {
                    address: vec![Ipv4Address {
                        ip: self.ip_address.clone(),
                        netmask: Some(self.netmask.clone()),
                    }],
                }),
            },
        }
    }
}

#[derive(Serialize, Debug)]
struct HostnamePayload {
    hostname: String,
}

#[derive(Serialize, Debug)]
struct DomainPayload {
    domain: DomainName,
}

#[derive(Serialize, Debug)]
struct DomainName {
    name: String,
}

impl RestconfClient {
    /// Build a client from the device configuration. The YANG media type
    /// headers ride on every request; TLS verification and the request
    /// timeout come straight from the config.
    pub fn new(config: &DeviceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(YANG_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(YANG_JSON));
        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(RestconfClient {
            client,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.username, Some(&self.password))
    }

    /// Send a request, keeping timeouts distinguishable from other
    /// transport failures in the reported error.
    fn send(&self, req: RequestBuilder, what: &str) -> Result<Response> {
        match req.send() {
            Ok(res) => Ok(res),
            Err(e) if e.is_timeout() => {
                Err(e).context(format!("Request timed out while {}", what))
            }
            Err(e) => Err(e).context(format!("Network error while {}", what)),
        }
    }

    /// GET the full interfaces collection as raw JSON, for display.
    pub fn get_interfaces_json(&self) -> Result<serde_json::Value> {
        let url = format!("{}/ietf-interfaces:interfaces", &self.base_url);
        let res = self.send(self.authed(self.client.get(&url)), "retrieving interfaces")?;
        if res.status() != StatusCode::OK {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Error retrieving interfaces: {} - {}", status, txt);
        }
        res.json().context("Parsing interfaces response json")
    }

    /// GET the interfaces collection and deserialize each entry, for the
    /// edit flow's table view.
    pub fn get_interfaces(&self) -> Result<Vec<Interface>> {
        let url = format!("{}/ietf-interfaces:interfaces", &self.base_url);
        let res = self.send(self.authed(self.client.get(&url)), "retrieving interfaces")?;
        if res.status() != StatusCode::OK {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Error retrieving interfaces: {} - {}", status, txt);
        }
        let reply: InterfacesReply = res.json().context("Parsing interfaces response json")?;
        Ok(reply.interfaces.interface)
    }

    /// PUT a replacement interface object keyed by its name. RESTCONF
    /// answers 204 No Content on success.
    pub fn put_interface(&self, edit: &EditRequest) -> Result<()> {
        let url = format!(
            "{}/ietf-interfaces:interfaces/interface={}",
            &self.base_url, &edit.interface_name
        );
        let res = self.send(
            self.authed(self.client.put(&url)).json(&edit.payload()),
            "editing the interface",
        )?;
        if res.status() != StatusCode::NO_CONTENT {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Error editing the interface: {} - {}", status, txt);
        }
        Ok(())
    }

    /// PUT a new hostname to the native-model hostname leaf.
    pub fn set_hostname(&self, hostname: &str) -> Result<()> {
        let url = format!("{}/Cisco-IOS-XE-native:native/hostname", &self.base_url);
        let payload = HostnamePayload {
            hostname: hostname.to_string(),
        };
        let res = self.send(
            self.authed(self.client.put(&url)).json(&payload),
            "updating the hostname",
        )?;
        if res.status() != StatusCode::NO_CONTENT {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Error updating hostname: {} - {}", status, txt);
        }
        Ok(())
    }

    /// PUT a new IP domain name to the native-model domain leaf.
    pub fn set_ip_domain(&self, domain: &str) -> Result<()> {
        let url = format!("{}/Cisco-IOS-XE-native:native/ip/domain", &self.base_url);
        let payload = DomainPayload {
            domain: DomainName {
                name: domain.to_string(),
            },
        };
        let res = self.send(
            self.authed(self.client.put(&url)).json(&payload),
            "updating the IP domain",
        )?;
        if res.status() != StatusCode::NO_CONTENT {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Error updating IP domain: {} - {}", status, txt);
        }
        Ok(())
    }

    /// GET the full native-model configuration, returned as raw text so
    /// the viewer can print it verbatim.
    pub fn get_native_config(&self) -> Result<String> {
        let url = format!("{}/Cisco-IOS-XE-native:native", &self.base_url);
        let res = self.send(
            self.authed(self.client.get(&url)),
            "retrieving the configuration",
        )?;
        if res.status() != StatusCode::OK {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Error retrieving configuration: {} - {}", status, txt);
        }
        res.text().context("Reading configuration response body")
    }
}
