use ratatui::style::Color;

/// Reserved category label that routes a question to the final round.
/// Matched case-insensitively against the trimmed category field.
pub const FINAL_ROUND_LABEL: &str = "final jeopardy";

pub const DEFAULT_DELIMITER: &str = ",";
pub const DEFAULT_QUALIFIER: &str = "\"";

/// Category header colors, cycled by column position.
pub const COLORS: [Color; 8] = [
    Color::Rgb(0, 102, 204),
    Color::Rgb(0, 153, 153),
    Color::Rgb(102, 51, 204),
    Color::Rgb(204, 102, 0),
    Color::Rgb(0, 153, 76),
    Color::Rgb(204, 0, 102),
    Color::Rgb(153, 102, 0),
    Color::Rgb(51, 102, 153),
];

pub const BOARD_SETTINGS: BoardSettings = BoardSettings {
    header_height: 3,
    cell_height: 3,
    player_bar_height: 4,
    max_players: 9,
};

pub struct BoardSettings {
    pub header_height: u16,
    pub cell_height: u16,
    pub player_bar_height: u16,
    pub max_players: usize,
}

/// Bundled example question set, written out by the `sample` subcommand.
/// Exercises qualified fields, doubled qualifiers and the final round.
pub const SAMPLE_SET: &str = "\
Category,Points,Answer,Question
Rust,100,This keyword introduces a variable binding,What is let?
Rust,200,\"This trait, found in std::fmt, powers the {} format specifier\",What is Display?
Rust,300,\"The \"\"borrow checker\"\" enforces this property of references\",What is aliasing XOR mutability?
Oceans,100,The largest ocean on Earth,What is the Pacific?
Oceans,200,This ocean borders both Brazil and Namibia,What is the Atlantic?
Oceans,300,\"The deepest known point in the ocean, inside the Mariana Trench\",What is Challenger Deep?
Space,100,The closest star to Earth,What is the Sun?
Space,200,This planet has the most confirmed moons in the solar system,What is Saturn?
Space,300,The year of the first crewed Moon landing,What is 1969?
Final Jeopardy,0,The only major programming language with a crab mascot,What is Rust?
";
