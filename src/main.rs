use npuzzle::Board;

fn main() {
    let board = Board::scrambled(3).unwrap();

    println!("Scrambled board:\n{}", board);
    println!("dimension: {}", board.dimension());
    println!("hamming:   {}", board.hamming());
    println!("manhattan: {}", board.manhattan());
    println!("solvable:  {}", board.is_solvable());

    println!("Neighbors:");
    for neighbor in board.neighbors() {
        println!("{}", neighbor);
    }

    println!("Twin:\n{}", board.twin());
}
