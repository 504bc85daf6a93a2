use drop_catcher::difficulty::Difficulty;

fn main() {
    // An optional difficulty name on the command line; anything else
    // (including nothing) means Medium.
    let difficulty = std::env::args()
        .nth(1)
        .map_or_else(Difficulty::default, |name| Difficulty::from_name(&name));
    drop_catcher::run(difficulty);
}
