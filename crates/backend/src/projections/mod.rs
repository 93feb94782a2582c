pub mod p900_inventory;
