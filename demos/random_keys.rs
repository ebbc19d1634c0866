/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Fills a tree with random keys and exercises every operation on it.
//!
//! ```text
//! cargo run --example random_keys -- 20 --seed 7 --borrowed -v
//! ```

use clap::Parser;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rbtree::{InsertOutcome, Order, Payload, RedBlackTree};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::error::Error;

/// Cookie handed to every print callback.
const COOKIE: i32 = 14;

#[derive(clap::Parser)]
struct Args {
    /// Number of random keys to insert, drawn from 0 to ten times this number
    #[arg(default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    nodes: u32,

    /// Seed for the key generator, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the keys in a caller-owned vector and store references to them in the tree
    #[arg(long)]
    borrowed: bool,

    /// Print node handles and colors, and raise the log level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn initialize_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    Ok(())
}

fn print_tree(tree: &RedBlackTree<'_, u64>, verbose: bool) {
    let mut cookie = COOKIE;

    if verbose {
        tree.traverse(tree.root(), &mut cookie, Order::InOrder, |node, cookie| {
            println!(
                " node: {:>4}    data: {:3}    cookie: {}    color: {:?}",
                node.index(),
                tree[node],
                cookie,
                tree.color(node)
            );
            0
        });
    } else {
        tree.apply_all(&mut cookie, Order::InOrder, |key, cookie| {
            println!(" node->key:  {key:3}    cookie: {cookie}");
            0
        });
    }
}

fn describe_neighbors(tree: &RedBlackTree<'_, u64>, target: u64) {
    let Some(node) = tree.find(&target) else {
        println!("  data not in tree");
        return;
    };

    match tree.get(tree.predecessor(node)) {
        Some(prior) => println!("  prior node has key {prior}"),
        None => println!("  no prior node for node (it is a minimum)"),
    }

    match tree.get(tree.successor(node)) {
        Some(next) => println!("  successor has key {next}"),
        None => println!("  no successor for node (it is a maximum)"),
    }
}

fn delete_key(tree: &mut RedBlackTree<'_, u64>, key: u64) {
    println!(" deleting node '{key}' in tree:");

    match tree.find(&key).and_then(|node| tree.delete(node)) {
        Some(payload) => debug!("deleted {} (owned by the tree: {})", *payload, payload.is_owned()),
        None => println!("key not found in tree, no action taken"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    initialize_logging(args.verbose)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let nodes = args.nodes as usize;
    let upper = 10 * u64::from(args.nodes);
    let keys: Vec<u64> = (0..nodes).map(|_| rng.gen_range(0..=upper)).collect();
    let target = keys[nodes / 2];
    let target2 = keys[3 * nodes / 4];

    let mut tree = RedBlackTree::with_capacity(nodes);

    println!("\n Adding {nodes} random ints in the range 0 - {upper}:");

    for key in &keys {
        let payload = if args.borrowed {
            Payload::Borrowed(key)
        } else {
            Payload::Owned(*key)
        };

        match tree.insert_payload(payload) {
            InsertOutcome::Inserted(_) => (),
            InsertOutcome::AlreadyExists(_) => warn!("duplicate: {key:3}"),
            InsertOutcome::AllocationFailed(e) => return Err(e.into()),
        }
    }

    println!("\n printing tree:\n");
    print_tree(&tree, args.verbose > 0);

    println!("\n tree population      : {}", tree.count());
    if let (Some(min), Some(max)) = (tree.get(tree.min()), tree.get(tree.max())) {
        println!(" minimum data in tree : {min}\n maximum data in tree : {max}\n");
    }

    print!(" searching for {target} in tree ");
    match tree.find(&target) {
        Some(node) => println!("=> found key {} in tree.\n", tree[node]),
        None => println!("=> NOT found in tree.\n"),
    }

    describe_neighbors(&tree, target);

    println!();
    delete_key(&mut tree, target);
    delete_key(&mut tree, target2);

    println!("\n tree population: {}\n", tree.count());

    println!(" printing tree:\n");
    print_tree(&tree, args.verbose > 0);

    println!("\n destroying tree:\n");

    let mut released = (0_usize, 0_usize);

    tree.destroy_with(|payload| match payload {
        Payload::Owned(_) => released.0 += 1,
        Payload::Borrowed(_) => released.1 += 1,
    });

    info!("released {} owned and {} borrowed payloads", released.0, released.1);

    Ok(())
}
