//! Default exclusions declared by the Genie ops library.
//!
//! Patterns are matched against object keys anywhere in a snapshot and
//! may be regular expressions (e.g. `(Null.*)`).

use super::definition::FeatureDefinition;

const ARP: &[&str] = &[
    "in_requests_pkts",
    "in_replies_pkts",
    "out_requests_pkts",
    "out_replies_pkts",
    "in_drops",
    "incomplete_total",
    "entries_total",
    "age",
];

const BGP: &[&str] = &[
    "if_handle",
    "keepalives",
    "last_reset",
    "reset_reason",
    "foreign_port",
    "local_port",
    "msg_rcvd",
    "msg_sent",
    "up_down",
    "bgp_table_version",
    "routing_table_version",
    "tbl_ver",
    "table_version",
    "memory_usage",
    "updates",
    "mss",
    "total",
    "total_bytes",
    "up_time",
    "bgp_negotiated_keepalive_timers",
    "hold_time",
    "keepalive_interval",
    "sent",
    "received",
    "status_codes",
    "holdtime",
    "router_id",
    "connections_dropped",
    "connections_established",
    "advertised",
    "prefixes",
    "routes",
    "state_pfxrcd",
];

const INTERFACE: &[&str] = &[
    "in_discards",
    "in_octets",
    "in_pkts",
    "last_clear",
    "out_octets",
    "out_pkts",
    "in_rate",
    "out_rate",
    "in_errors",
    "in_crc_errors",
    "in_rate_pkts",
    "out_rate_pkts",
    "in_broadcast_pkts",
    "out_broadcast_pkts",
    "in_multicast_pkts",
    "out_multicast_pkts",
    "in_unicast_pkts",
    "out_unicast_pkts",
    "last_change",
    "mac_address",
    "phys_address",
    "((t|T)unnel.*)",
    "(Null.*)",
    "chars_out",
    "chars_in",
    "in_frame",
    "in_mac_pause_frames",
    "in_oversize_frames",
    "out_errors",
    "out_mac_pause_frames",
    "accounting",
];

const LLDP: &[&str] = &[
    "frame_in",
    "frame_out",
    "tlv_discard",
    "tlv_unknown",
    "frame_discard",
    "frame_error_in",
    "entries_aged_out",
    "counters",
];

const NTP: &[&str] = &[
    "delay",
    "poll",
    "reach",
    "offset",
    "jitter",
    "dispersion",
    "root_delay",
    "root_dispersion",
    "refid",
    "receive_time",
    "reference_time",
];

const OSPF: &[&str] = &[
    "age",
    "uptime",
    "last_change",
    "cksum",
    "seq",
    "dead_timer",
    "hello_timer",
    "checksum",
    "seq_num",
    "statistics",
    "lsas",
    "last_state_change",
    "bdr_ip_addr",
    "dr_ip_addr",
    "state",
    "bdr_router_id",
    "dr_router_id",
    "area_scope_lsa_cksum_sum",
];

const PLATFORM: &[&str] = &[
    "maker",
    "rp_uptime",
    "sn",
    "main_mem",
    "switchover_reason",
    "config_register",
    "chassis_sn",
    "uptime",
    "disk_free_space",
    "disk_used_space",
];

const ROUTING: &[&str] = &["updated"];

const STP: &[&str] = &[
    "rootport",
    "time_since_topology_change",
    "topology_changes",
    "counters",
];

const VRF: &[&str] = &["route_distinguisher"];

/// All built-in feature definitions.
pub(super) fn definitions() -> Vec<FeatureDefinition> {
    [
        ("arp", ARP),
        ("bgp", BGP),
        ("interface", INTERFACE),
        ("lldp", LLDP),
        ("ntp", NTP),
        ("ospf", OSPF),
        ("platform", PLATFORM),
        ("routing", ROUTING),
        ("stp", STP),
        ("vrf", VRF),
    ]
    .into_iter()
    .map(|(name, patterns)| FeatureDefinition::new(name).with_exclusions(patterns.iter().copied()))
    .collect()
}
