use std::error::Error;

use qrsmith::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Only data is provided, version and mask are chosen automatically
    let qr = QRBuilder::new(b"Hello, World!").build()?;

    // Print to the terminal
    println!("{}", qr.to_str(1));

    // Convert to image and save
    let img = qr.to_image(4); // 4x scale factor
    img.save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    println!("QR metadata: {}", qr.metadata());
    Ok(())
}
