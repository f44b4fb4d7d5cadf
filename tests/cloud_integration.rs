// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the cloud topology fetch using wiremock.

#![cfg(feature = "cloud")]

use std::sync::Arc;
use std::time::Duration;

use smartwindow_lib::Error;
use smartwindow_lib::error::{ProtocolError, TopologyError};
use smartwindow_lib::protocol::TcpTransport;
use smartwindow_lib::topology::{CloudClient, CloudConfig, EntityMapper, MemoryRegistry};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> CloudClient {
    CloudConfig::new()
        .with_url(format!("{}/hope/v3/users/buildings", server.uri()))
        .with_timeout(Duration::from_secs(5))
        .into_client()
        .unwrap()
}

fn envelope() -> serde_json::Value {
    serde_json::json!({
        "Remote_Data": {
            "Creator_Buildings": [{
                "Home": {
                    "Bearer": "device-token",
                    "Rooms": [{
                        "Name": "Kitchen",
                        "Windows": [{
                            "Id_Window": 12,
                            "Name": "South",
                            "Ip": "192.168.1.50",
                            "Services": ["S9", "S5"],
                            "Sensors": [{"Op": 4, "Value": 21.0}]
                        }]
                    }]
                }
            }]
        }
    })
}

#[tokio::test]
async fn fetches_and_maps_topology() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hope/v3/users/buildings"))
        .and(header("Authorization", "Bearer account-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let topology = client(&server).fetch_topology("account-token").await.unwrap();
    assert_eq!(topology.buildings().len(), 1);

    let entities = EntityMapper::new(Arc::new(TcpTransport::new()))
        .map(&topology, &MemoryRegistry::new());

    assert_eq!(entities.covers.len(), 1);
    assert_eq!(entities.lights.len(), 1);
    assert_eq!(entities.switches.len(), 1);
    assert_eq!(entities.sensors.len(), 1);
    assert_eq!(entities.covers[0].name(), "Kitchen - South");
    assert_eq!(entities.covers[0].endpoint().bearer(), "device-token");
}

#[tokio::test]
async fn rejected_token_is_authentication_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server).fetch_topology("stale").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Protocol(ProtocolError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).fetch_topology("token").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Protocol(ProtocolError::UnexpectedStatus(500))
    ));
}

#[tokio::test]
async fn empty_account_is_topology_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Remote_Data": {"Creator_Buildings": []}
        })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_topology("token").await.unwrap_err();
    assert!(matches!(err, Error::Topology(TopologyError::Empty)));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_topology("token").await.unwrap_err();
    assert!(matches!(err, Error::Topology(TopologyError::Malformed(_))));
}
