fn main() {
    chess_core::mock::run_interactive_terminal();
}
