//! Console presentation of session results.
//!
//! Note: this module uses `println!` intentionally; these lines are the
//! program's output, not diagnostics.

use crate::data::stats::{HostRanking, PricePerRoom};

/// Active-set size followed by one line per listing.
pub fn print_stats(total: usize, stats: &[PricePerRoom]) {
    println!("\nAfter filtering, {total} listings are found.");
    println!("\nAverage Price per Number of Rooms:");
    for entry in stats {
        println!(
            "  id {:<12} price ${:<10.2} rooms {:<3} per room {}",
            entry.id, entry.total_price, entry.room_num, entry.avg_price_per_room
        );
    }
}

/// The head of a ranking. `shown` is a slice of the full ranking.
pub fn print_host_rankings(shown: &[HostRanking], total_hosts: usize) {
    println!(
        "\nHost Rankings (top {} of {total_hosts} shown):",
        shown.len()
    );
    for (rank, entry) in shown.iter().enumerate() {
        println!("  {:>3}. host {:<12} {} listings", rank + 1, entry.host, entry.count);
    }
}

pub fn print_max_price(listing_count: usize, max_price: f64) {
    println!("\nAmong {listing_count} listings, the max price is ${max_price}.");
}
